use std::collections::HashMap;

use crate::MAIN_WINDOW_KEY;

/// Host-side identity of a window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    pub label: String,
}

impl WindowHandle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Tracks at most one window per well-known key. The launcher only uses
/// [`MAIN_WINDOW_KEY`].
#[derive(Debug, Default)]
pub struct WindowRegistry {
    slots: HashMap<&'static str, WindowHandle>,
}

impl WindowRegistry {
    pub fn main(&self) -> Option<&WindowHandle> {
        self.slots.get(MAIN_WINDOW_KEY)
    }

    /// Replaces the tracked main window and returns the previous handle. The
    /// previous window stays open.
    pub fn replace_main(&mut self, handle: WindowHandle) -> Option<WindowHandle> {
        self.slots.insert(MAIN_WINDOW_KEY, handle)
    }

    /// Clears the main slot only when `label` is the tracked window.
    pub fn clear_if_main(&mut self, label: &str) -> bool {
        if self.main().is_some_and(|handle| handle.label == label) {
            self.slots.remove(MAIN_WINDOW_KEY);
            return true;
        }
        false
    }
}
