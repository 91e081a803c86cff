use std::{
    net::{TcpStream, ToSocketAddrs},
    path::PathBuf,
    process::{Child, Command, Stdio},
    sync::Mutex,
    thread,
    time::{Duration, Instant},
};

use serde::Serialize;
use url::Url;

use crate::{
    append_automation_log, AutomationError, LaunchConfig, AUTOMATION_CMD_ENV,
    AUTOMATION_TIMEOUT_ENV, PORT_ENV,
};

pub const AUTOMATION_OPTIONS_ENV: &str = "WEBFORM_SHELL_AUTOMATION_OPTIONS";
const PING_TIMEOUT_MS: u64 = 800;
const POLL_INTERVAL_MS: u64 = 600;

/// Options handed to the build/watch tool. The shape is fixed; only the app
/// root varies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationOptions {
    pub app_root: PathBuf,
    pub watch_jobs: bool,
    pub run_web_form: bool,
    pub auto_build_web_form: bool,
    pub no_prompt: bool,
    pub run_web_api: bool,
}

impl AutomationOptions {
    pub fn for_app_root(app_root: PathBuf) -> Self {
        Self {
            app_root,
            watch_jobs: true,
            run_web_form: true,
            auto_build_web_form: true,
            no_prompt: true,
            run_web_api: true,
        }
    }
}

/// The external build/watch/serve step. `run` returns once the app is ready
/// to be shown or has failed; it blocks, so hosts call it off the UI thread.
pub trait Automation: Send + Sync {
    fn run(&self, options: &AutomationOptions) -> Result<(), AutomationError>;

    /// Releases anything `run` left running. Called when the host exits.
    fn stop(&self) {}
}

/// Runs an external command and waits for the local server to accept
/// connections.
#[derive(Debug)]
pub struct CommandAutomation {
    command: Option<String>,
    server_url: String,
    port: u16,
    timeout: Option<Duration>,
    child: Mutex<Option<Child>>,
}

impl CommandAutomation {
    pub fn from_env<F>(config: &LaunchConfig, env_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let command = env_lookup(AUTOMATION_CMD_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let timeout = env_lookup(AUTOMATION_TIMEOUT_ENV)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self {
            command,
            server_url: config.server_url(),
            port: config.port,
            timeout,
            child: Mutex::new(None),
        }
    }

    fn start_process(
        &self,
        command: &str,
        options: &AutomationOptions,
    ) -> Result<(), AutomationError> {
        let mut pieces = shlex::split(command).ok_or_else(|| AutomationError::InvalidCommand {
            command: command.to_string(),
        })?;
        if pieces.is_empty() {
            return Err(AutomationError::InvalidCommand {
                command: command.to_string(),
            });
        }
        let program = pieces.remove(0);
        let serialized_options =
            serde_json::to_string(options).map_err(|error| AutomationError::Failed {
                reason: format!("Failed to serialize automation options: {error}"),
            })?;

        let mut debug_command = vec![program.clone()];
        debug_command.extend(pieces.iter().cloned());
        append_automation_log(&format!("starting automation: {debug_command:?}"));

        let child = Command::new(&program)
            .args(&pieces)
            .current_dir(&options.app_root)
            .env(AUTOMATION_OPTIONS_ENV, serialized_options)
            .env(PORT_ENV, self.port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|error| AutomationError::Spawn {
                command: debug_command,
                reason: error.to_string(),
            })?;

        let mut guard = self.child.lock().map_err(|_| AutomationError::Failed {
            reason: "Automation process lock poisoned.".to_string(),
        })?;
        *guard = Some(child);
        Ok(())
    }

    fn wait_for_server(&self) -> Result<(), AutomationError> {
        let start_time = Instant::now();

        loop {
            if ping_server(&self.server_url, PING_TIMEOUT_MS) {
                append_automation_log(&format!(
                    "server reachable at {} after {}ms",
                    self.server_url,
                    start_time.elapsed().as_millis()
                ));
                return Ok(());
            }

            {
                let mut guard = self.child.lock().map_err(|_| AutomationError::Failed {
                    reason: "Automation process lock poisoned.".to_string(),
                })?;
                if let Some(child) = guard.as_mut() {
                    match child.try_wait() {
                        Ok(Some(status)) => {
                            *guard = None;
                            return Err(AutomationError::Exited {
                                status: status.to_string(),
                            });
                        }
                        Ok(None) => {}
                        Err(error) => {
                            return Err(AutomationError::Failed {
                                reason: format!("Failed to poll automation process: {error}"),
                            });
                        }
                    }
                }
            }

            if let Some(limit) = self.timeout {
                if start_time.elapsed() >= limit {
                    return Err(AutomationError::TimedOut {
                        url: self.server_url.clone(),
                        timeout_ms: limit.as_millis() as u64,
                    });
                }
            }

            thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }
}

impl Automation for CommandAutomation {
    fn run(&self, options: &AutomationOptions) -> Result<(), AutomationError> {
        match &self.command {
            Some(command) => self.start_process(command, options)?,
            None => append_automation_log(&format!(
                "{AUTOMATION_CMD_ENV} is not set; waiting for an external server"
            )),
        }
        self.wait_for_server()
    }

    fn stop(&self) {
        let child = match self.child.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(mut process) = child {
            append_automation_log("stopping automation process");
            stop_child_process(&mut process);
        }
    }
}

pub fn ping_server(server_url: &str, timeout_ms: u64) -> bool {
    let Ok(parsed) = Url::parse(server_url) else {
        return false;
    };
    let Some(host) = parsed.host_str().map(str::to_string) else {
        return false;
    };
    let port = parsed.port_or_known_default().unwrap_or(80);
    let timeout = Duration::from_millis(timeout_ms.max(50));

    let Ok(addrs) = (host.as_str(), port).to_socket_addrs() else {
        return false;
    };
    addrs
        .into_iter()
        .any(|address| TcpStream::connect_timeout(&address, timeout).is_ok())
}

fn stop_child_process(child: &mut Child) {
    #[cfg(target_os = "windows")]
    {
        let _ = Command::new("taskkill")
            .args(["/pid", &child.id().to_string(), "/t", "/f"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .status();
        let _ = child.wait();
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = child.kill();
        let _ = child.wait();
    }
}
