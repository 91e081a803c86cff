use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{DEFAULT_PORT, PORT_ENV};

/// Command-line flags. Long names keep the camelCase spelling the shell has
/// always accepted.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "webform-shell", version, about = "Desktop shell for the WebForm app")]
pub struct CliArgs {
    /// Application root; the re-exec passes "."
    pub app_root: Option<PathBuf>,

    /// Suppress the startup banner
    #[arg(long = "noLogo")]
    pub no_logo: bool,

    /// Relaunch inside the desktop host
    #[arg(long = "runElectron", visible_alias = "runHost")]
    pub run_host: bool,

    /// Log level forwarded to the hosted instance
    #[arg(long = "log", value_name = "LEVEL")]
    pub log: Option<String>,

    /// Local server port
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,
}

/// Startup configuration, resolved once and passed to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub port: u16,
    pub log_level: Option<String>,
    pub auto_run_host: bool,
    pub suppress_logo: bool,
    pub app_root: PathBuf,
}

impl LaunchConfig {
    pub fn resolve<F>(cli: &CliArgs, cwd: &Path, env_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = cli
            .port
            .or_else(|| env_lookup(PORT_ENV).and_then(|value| parse_port(&value)))
            .unwrap_or(DEFAULT_PORT);
        let log_level = cli
            .log
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Self {
            port,
            log_level,
            auto_run_host: cli.run_host,
            suppress_logo: cli.no_logo,
            app_root: resolve_app_root(cli.app_root.as_deref(), cwd),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }

    pub fn webform_dir(&self) -> PathBuf {
        crate::WEBFORM_DIR
            .iter()
            .fold(self.app_root.clone(), |path, part| path.join(part))
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port > 0)
}

fn resolve_app_root(raw: Option<&Path>, cwd: &Path) -> PathBuf {
    match raw {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) if path != Path::new(".") && !path.as_os_str().is_empty() => cwd.join(path),
        _ => cwd.to_path_buf(),
    }
}
