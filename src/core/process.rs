use crate::core::error::{Result, VshError};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

pub struct ProcessExecutor;

impl ProcessExecutor {
    pub async fn execute(cmd: &str, args: &[&str]) -> Result<Output> {
        let output = Command::new(cmd)
            .args(args)
            .output()
            .await
            .map_err(|e| VshError::CommandFailed(format!("{}: {}", cmd, e)))?;

        Ok(output)
    }

    pub async fn execute_with_status(cmd: &str, args: &[&str]) -> Result<bool> {
        let output = Self::execute(cmd, args).await?;
        Ok(output.status.success())
    }

    pub async fn execute_with_output(cmd: &str, args: &[&str]) -> Result<String> {
        let output = Self::execute(cmd, args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VshError::CommandFailed(format!(
                "{} failed: {}",
                cmd, stderr
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Best-effort stdout capture with an explicit working directory.
    /// Returns None when the command cannot be spawned or exits non-zero.
    pub async fn try_stdout_in(cmd: &str, args: &[&str], cwd: &Path) -> Option<String> {
        let output = Command::new(cmd)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            None
        } else {
            Some(stdout)
        }
    }

    pub fn check_command_exists(cmd: &str) -> bool {
        let probe = if cfg!(windows) { "where" } else { "which" };
        std::process::Command::new(probe)
            .arg(cmd)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}
