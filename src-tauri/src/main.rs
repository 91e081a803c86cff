#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_runtime;
mod app_types;
mod main_window;
mod ui_dispatch;

use std::{env, path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use webform_shell::{
    append_error_log, append_startup_log, banner, detect_host_mode, init_desktop_log,
    launch_plan, BootstrapOutcome, CliArgs, CommandAutomation, InheritStdioSpawner,
    LaunchConfig, Launcher,
};

pub(crate) use app_types::ShellState;

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = LaunchConfig::resolve(&cli, &cwd, env_lookup);
    init_desktop_log(config.log_level.as_deref());
    banner::print_banner(&config.app_root, config.suppress_logo);

    let mode = detect_host_mode(env_lookup);
    append_startup_log(&format!("startup mode: {mode:?}, port {}", config.port));

    let automation = Arc::new(CommandAutomation::from_env(&config, env_lookup));
    let mut launcher = Launcher::new(config);
    let outcome = launcher.bootstrap(
        mode,
        &mut InheritStdioSpawner,
        || launch_plan::resolve_host_binary(env_lookup, env::current_exe()),
        &cwd,
    );

    match outcome {
        Ok(BootstrapOutcome::Hosted) => {
            app_runtime::run(launcher, automation);
            ExitCode::SUCCESS
        }
        Ok(BootstrapOutcome::Relaunched { .. }) | Ok(BootstrapOutcome::Idle) => ExitCode::SUCCESS,
        Err(error) => {
            append_error_log(&format!("failed to relaunch inside desktop host: {error}"));
            ExitCode::FAILURE
        }
    }
}
