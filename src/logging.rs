use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{DESKTOP_LOG_FILE, LOG_DIR_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" | "verbose" => Some(Self::Debug),
            "trace" | "silly" => Some(Self::Trace),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

struct DesktopLog {
    path: PathBuf,
    threshold: LogLevel,
}

static DESKTOP_LOG: OnceLock<DesktopLog> = OnceLock::new();

/// Installs the process-wide desktop log. Later calls are ignored.
pub fn init_desktop_log(log_level: Option<&str>) {
    let threshold = log_level
        .and_then(LogLevel::parse)
        .unwrap_or(LogLevel::Info);
    let path = resolve_desktop_log_path(env::var(LOG_DIR_ENV).ok(), home::home_dir());
    let _ = DESKTOP_LOG.set(DesktopLog { path, threshold });
}

pub fn resolve_desktop_log_path(
    override_dir: Option<String>,
    home_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = override_dir
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return PathBuf::from(dir).join(DESKTOP_LOG_FILE);
    }

    home_dir
        .map(|home| home.join(".webform-shell").join("logs"))
        .unwrap_or_else(env::temp_dir)
        .join(DESKTOP_LOG_FILE)
}

pub fn format_log_line(level: LogLevel, scope: &str, message: &str) -> String {
    format!(
        "[{}] [{}] [{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level.tag(),
        scope,
        message
    )
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

pub fn log_with_level(level: LogLevel, scope: &str, message: &str) {
    let threshold = DESKTOP_LOG
        .get()
        .map(|log| log.threshold)
        .unwrap_or(LogLevel::Info);
    if level > threshold {
        return;
    }

    let line = format_log_line(level, scope, message);
    eprintln!("{line}");
    if let Some(log) = DESKTOP_LOG.get() {
        // The log file is best effort; stderr already carries the line.
        let _ = append_line(&log.path, &line);
    }
}

pub fn append_startup_log(message: &str) {
    log_with_level(LogLevel::Info, "startup", message);
}

pub fn append_window_log(message: &str) {
    log_with_level(LogLevel::Info, "window", message);
}

pub fn append_automation_log(message: &str) {
    log_with_level(LogLevel::Info, "automation", message);
}

pub fn append_debug_log(message: &str) {
    log_with_level(LogLevel::Debug, "debug", message);
}

pub fn append_error_log(message: &str) {
    log_with_level(LogLevel::Error, "error", message);
}
