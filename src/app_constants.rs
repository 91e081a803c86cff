pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WINDOW_TITLE: &str = "WebForm";
pub const DEFAULT_WINDOW_WIDTH: f64 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 800.0;
pub const MAIN_WINDOW_KEY: &str = "main";

pub const PORT_ENV: &str = "PORT";
pub const HOSTED_ENV: &str = "WEBFORM_SHELL_HOSTED";
pub const HOST_BIN_ENV: &str = "WEBFORM_SHELL_HOST_BIN";
pub const AUTOMATION_CMD_ENV: &str = "WEBFORM_SHELL_AUTOMATION_CMD";
pub const AUTOMATION_TIMEOUT_ENV: &str = "WEBFORM_SHELL_AUTOMATION_TIMEOUT_MS";
pub const LOG_DIR_ENV: &str = "WEBFORM_SHELL_LOG_DIR";

pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const WEBFORM_DIR: [&str; 2] = ["app", "webform"];
pub const ICON_NAME: &str = "icon";
pub const ICON_EXTENSIONS: [&str; 4] = ["ico", "icns", "png", "jpg"];

pub const INCONSISTENT_ACTIVATE_MESSAGE: &str =
    "The shell still tracks a main window, but the host reports no visible windows.";
pub const GENERIC_REPORT_MESSAGE: &str =
    "An error occurred, and the error details could not be formatted.";
