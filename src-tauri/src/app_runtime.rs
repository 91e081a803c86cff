use std::sync::Arc;

use tauri::{AppHandle, Manager, RunEvent, WindowEvent};
use webform_shell::{
    append_automation_log, append_error_log, append_startup_log,
    launcher::run_automation_guarded, Automation, AutomationError, Launcher,
};

use crate::{main_window::TauriWindowHost, ui_dispatch, ShellState};

pub(crate) fn run(launcher: Launcher, automation: Arc<dyn Automation>) {
    append_startup_log("desktop host starting");

    let app = match tauri::Builder::default()
        .manage(ShellState::new(launcher, automation))
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let state = window.app_handle().state::<ShellState>();
                state.with_launcher("window closed", |launcher| {
                    launcher.handle_window_closed(window.label())
                });
            }
        })
        .build(tauri::generate_context!())
    {
        Ok(app) => app,
        Err(error) => {
            append_error_log(&format!("failed to build desktop host: {error}"));
            std::process::exit(1);
        }
    };

    app.run(|app_handle, event| match event {
        RunEvent::Ready => start_automation(app_handle),
        RunEvent::ExitRequested { code: None, api, .. } => {
            let state = app_handle.state::<ShellState>();
            let mut host = TauriWindowHost::new(app_handle);
            let exiting = state
                .with_launcher("all windows closed", |launcher| {
                    launcher.handle_all_windows_closed(&mut host)
                })
                .unwrap_or(true);
            if !exiting {
                api.prevent_exit();
            }
        }
        RunEvent::Exit => {
            let state = app_handle.state::<ShellState>();
            state.automation().stop();
            append_startup_log("desktop host exited");
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => handle_activate(app_handle, has_visible_windows),
        _ => {}
    });
}

fn start_automation(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let Some(options) = state
        .with_launcher("ready", |launcher| launcher.handle_ready())
        .flatten()
    else {
        return;
    };

    let automation = state.automation();
    let worker_app = app_handle.clone();
    tauri::async_runtime::spawn_blocking(move || {
        let result = run_automation_guarded(automation.as_ref(), &options);
        if let Err(error) = ui_dispatch::run_on_main_thread_dispatch(
            &worker_app,
            "finish automation",
            move |main_app| finish_automation(main_app, result),
        ) {
            append_error_log(&error);
        }
    });
}

fn finish_automation(app_handle: &AppHandle, result: Result<(), AutomationError>) {
    let state = app_handle.state::<ShellState>();
    let mut host = TauriWindowHost::new(app_handle);
    let outcome = state.with_launcher("finish automation", |launcher| {
        launcher.handle_automation_result(&mut host, result)
    });
    match outcome {
        Some(Ok(handle)) => append_automation_log(&format!("window {} shown", handle.label)),
        Some(Err(error)) => append_error_log(&format!("failed to show window: {error}")),
        None => {}
    }
}

#[cfg(target_os = "macos")]
fn handle_activate(app_handle: &AppHandle, has_visible_windows: bool) {
    let state = app_handle.state::<ShellState>();
    let mut host = TauriWindowHost::new(app_handle);
    let outcome = state.with_launcher("activate", |launcher| {
        launcher.handle_activate(&mut host, has_visible_windows)
    });
    match outcome {
        Some(Ok(Some(handle))) => {
            webform_shell::append_window_log(&format!("activate opened {}", handle.label))
        }
        Some(Err(error)) => append_error_log(&format!("activate failed: {error}")),
        _ => {}
    }
}
