use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{LaunchConfig, LaunchError, HOSTED_ENV, HOST_BIN_ENV, PORT_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub cmd: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub envs: Vec<(String, String)>,
}

/// Starts a process described by a plan. The parent never waits on it.
pub trait ProcessSpawner {
    fn spawn(&mut self, plan: &LaunchPlan) -> Result<u32, LaunchError>;
}

/// Spawns with inherited stdin/stdout/stderr.
#[derive(Debug, Default)]
pub struct InheritStdioSpawner;

impl ProcessSpawner for InheritStdioSpawner {
    fn spawn(&mut self, plan: &LaunchPlan) -> Result<u32, LaunchError> {
        let child = Command::new(&plan.cmd)
            .args(&plan.args)
            .current_dir(&plan.cwd)
            .envs(plan.envs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: build_debug_command(plan),
                source,
            })?;
        Ok(child.id())
    }
}

pub fn reexec_args(config: &LaunchConfig) -> Vec<String> {
    let mut args = vec![".".to_string(), format!("--port={}", config.port)];
    if let Some(level) = &config.log_level {
        args.push(format!("--log={level}"));
    }
    args
}

pub fn build_reexec_plan(config: &LaunchConfig, host_bin: PathBuf, cwd: &Path) -> LaunchPlan {
    LaunchPlan {
        cmd: host_bin,
        args: reexec_args(config),
        cwd: cwd.to_path_buf(),
        envs: vec![
            (HOSTED_ENV.to_string(), "1".to_string()),
            (PORT_ENV.to_string(), config.port.to_string()),
        ],
    }
}

pub fn resolve_host_binary<F>(
    env_lookup: F,
    current_exe: std::io::Result<PathBuf>,
) -> Result<PathBuf, LaunchError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(custom) = env_lookup(HOST_BIN_ENV)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return Ok(PathBuf::from(custom));
    }

    current_exe.map_err(|error| LaunchError::HostBinaryUnavailable(error.to_string()))
}

pub fn build_debug_command(plan: &LaunchPlan) -> Vec<String> {
    let mut parts = vec![plan.cmd.to_string_lossy().to_string()];
    parts.extend(plan.args.clone());
    parts
}
