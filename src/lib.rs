//! Launcher core for the WebForm desktop shell: flag and environment
//! resolution, the relaunch into the desktop host, and the window lifecycle
//! the host drives once it is ready.

mod app_constants;
pub mod automation;
pub mod banner;
mod errors;
pub mod error_report;
pub mod icon_path;
pub mod launch_config;
pub mod launch_plan;
pub mod launcher;
pub mod logging;
pub mod startup_mode;
pub mod window_registry;

pub use app_constants::*;
pub use automation::{Automation, AutomationOptions, CommandAutomation};
pub use errors::{AutomationError, HostError, LaunchError};
pub use launch_config::{CliArgs, LaunchConfig};
pub use launch_plan::{InheritStdioSpawner, LaunchPlan, ProcessSpawner};
pub use launcher::{BootstrapOutcome, Launcher, LauncherState, WindowHost, WindowRequest};
pub use logging::{
    append_automation_log, append_debug_log, append_error_log, append_startup_log,
    append_window_log, init_desktop_log, LogLevel,
};
pub use startup_mode::{detect_host_mode, HostMode};
pub use window_registry::{WindowHandle, WindowRegistry};
