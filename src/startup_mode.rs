use crate::HOSTED_ENV;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Plain command-line invocation.
    Standalone,
    /// Running inside the desktop host; owns the window.
    Hosted,
}

/// The re-exec marks the child with `WEBFORM_SHELL_HOSTED=1`.
pub fn detect_host_mode<F>(env_lookup: F) -> HostMode
where
    F: Fn(&str) -> Option<String>,
{
    match env_lookup(HOSTED_ENV).as_deref().map(str::trim) {
        Some("1") | Some("true") => HostMode::Hosted,
        _ => HostMode::Standalone,
    }
}
