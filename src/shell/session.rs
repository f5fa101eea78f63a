use crate::config::VenvConfig;
use crate::core::error::{Result, VshError};
use crate::core::Settings;
use crate::shell::activation::activation_env;
use crate::shell::rc::{self, RcFiles};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub struct SessionOptions {
    /// Command run inside the environment; empty means the shell itself.
    pub command: Vec<String>,
    pub working: Option<PathBuf>,
    pub ignore_working: bool,
}

/// One interactive run inside an environment: rc discovery, activation env,
/// subshell spawn, exit code propagation.
pub struct ShellSession<'a> {
    config: &'a VenvConfig,
    settings: &'a Settings,
}

impl<'a> ShellSession<'a> {
    pub fn new(config: &'a VenvConfig, settings: &'a Settings) -> Self {
        Self { config, settings }
    }

    pub async fn run(&self, opts: &SessionOptions) -> Result<i32> {
        let invocation_dir = std::env::current_dir()?;
        let cwd = self.resolve_cwd(opts, &invocation_dir);
        let rc_files = rc::discover(self.settings, &self.config.venv.path, &invocation_dir).await?;
        let env = activation_env(self.config, self.settings);
        let shell = self.config.shell_path(self.settings);

        let command = if opts.command.is_empty() {
            shell.display().to_string()
        } else {
            opts.command.join(" ")
        };

        let payload = assemble_payload(&rc_files, &command);
        tracing::debug!(
            "Running in {}: {} -c {}",
            self.config.venv.name,
            shell.display(),
            payload
        );

        let mut child = Command::new(&shell);
        configure_shell_args(&mut child, &payload);

        let status = child
            .env_clear()
            .envs(&env)
            .current_dir(&cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                VshError::CommandFailed(format!("Failed to spawn {}: {}", shell.display(), e))
            })?;

        Ok(exit_code(status))
    }

    fn resolve_cwd(&self, opts: &SessionOptions, invocation_dir: &Path) -> PathBuf {
        if opts.ignore_working {
            return invocation_dir.to_path_buf();
        }

        opts.working
            .clone()
            .or_else(|| self.config.venv.working_path.clone())
            .filter(|p| p.is_dir())
            .unwrap_or_else(|| invocation_dir.to_path_buf())
    }
}

/// Chains startup sources, the command, and teardown sources into one shell
/// payload. Teardown runs whether the command succeeded or not, and the
/// command's exit status is re-raised afterwards.
fn assemble_payload(rc_files: &RcFiles, command: &str) -> String {
    let joiner = if cfg!(windows) { "; " } else { " && " };

    let mut parts: Vec<String> = rc_files
        .startup
        .iter()
        .map(|p| format!(". {}", p.display()))
        .collect();
    parts.push(command.to_string());
    let mut payload = parts.join(joiner);

    if !cfg!(windows) && !rc_files.teardown.is_empty() {
        let teardown = rc_files
            .teardown
            .iter()
            .map(|p| format!(". {}", p.display()))
            .collect::<Vec<_>>()
            .join("; ");
        payload = format!("{}; _vsh_status=$?; {}; exit $_vsh_status", payload, teardown);
    }

    payload
}

#[cfg(not(windows))]
fn configure_shell_args(cmd: &mut Command, payload: &str) {
    use std::io::IsTerminal;
    if std::io::stdout().is_terminal() {
        cmd.arg("-i");
    }
    cmd.arg("-c").arg(payload);
}

#[cfg(windows)]
fn configure_shell_args(cmd: &mut Command, payload: &str) {
    cmd.args(["-ExecutionPolicy", "Bypass", "-NoLogo", "-Command", payload]);
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Removes an ephemeral environment when dropped, whether the session
/// returned normally, errored, or unwound.
pub struct EphemeralGuard {
    venv_path: PathBuf,
    config_path: PathBuf,
}

impl EphemeralGuard {
    pub fn new(venv_path: PathBuf, config_path: PathBuf) -> Self {
        Self {
            venv_path,
            config_path,
        }
    }
}

impl Drop for EphemeralGuard {
    fn drop(&mut self) {
        if self.venv_path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.venv_path) {
                tracing::warn!(
                    "Failed to remove ephemeral environment {}: {}",
                    self.venv_path.display(),
                    e
                );
            }
        }
        if self.config_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config_path) {
                tracing::warn!(
                    "Failed to remove configuration {}: {}",
                    self.config_path.display(),
                    e
                );
            }
        }
    }
}
