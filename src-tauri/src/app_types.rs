use std::sync::{Arc, Mutex};

use webform_shell::{append_error_log, Automation, Launcher};

/// Launcher state shared with the Tauri run loop. The lock is only taken on
/// the main thread and never held while the automation runs.
pub(crate) struct ShellState {
    launcher: Mutex<Launcher>,
    automation: Arc<dyn Automation>,
}

impl ShellState {
    pub(crate) fn new(launcher: Launcher, automation: Arc<dyn Automation>) -> Self {
        Self {
            launcher: Mutex::new(launcher),
            automation,
        }
    }

    pub(crate) fn with_launcher<T, F>(&self, action: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Launcher) -> T,
    {
        match self.launcher.lock() {
            Ok(mut guard) => Some(f(&mut guard)),
            Err(_) => {
                append_error_log(&format!("launcher lock poisoned, skipping {action}"));
                None
            }
        }
    }

    pub(crate) fn automation(&self) -> Arc<dyn Automation> {
        Arc::clone(&self.automation)
    }
}
