use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Cannot resolve the desktop host binary: {0}")]
    HostBinaryUnavailable(String),

    #[error("Failed to spawn desktop host with command {command:?}: {source}")]
    Spawn {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of the automation step. Serializable so the diagnostic window can
/// show the structured form next to the message.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AutomationError {
    #[error("Invalid automation command: {command}")]
    InvalidCommand { command: String },

    #[error("Failed to spawn automation command {command:?}: {reason}")]
    Spawn { command: Vec<String>, reason: String },

    #[error("Automation exited before the server became reachable: {status}")]
    Exited { status: String },

    #[error("Timed out after {timeout_ms}ms waiting for {url}")]
    TimedOut { url: String, timeout_ms: u64 },

    #[error("Automation failed: {reason}")]
    Failed { reason: String },
}

/// Serializes as its message, so it can be rendered in a diagnostic window.
#[derive(Debug, Error, Serialize)]
#[error("{0}")]
pub struct HostError(pub String);
