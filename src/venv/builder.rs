use crate::core::error::{Result, VshError};
use crate::core::ProcessExecutor;
use crate::venv::layout::VenvLayout;

/// Builds virtual environments by delegating to `uv venv`.
#[derive(Debug, Clone)]
pub struct VenvBuilder {
    pub python: Option<String>,
    pub prompt: Option<String>,
    pub seed: bool,
    pub system_site_packages: bool,
    pub overwrite: bool,
}

impl Default for VenvBuilder {
    fn default() -> Self {
        Self {
            python: None,
            prompt: None,
            seed: true,
            system_site_packages: false,
            overwrite: false,
        }
    }
}

impl VenvBuilder {
    pub fn check_tool_installed() -> Result<()> {
        if !ProcessExecutor::check_command_exists("uv") {
            return Err(VshError::Builder(
                "uv is not installed. Please install it first: https://github.com/astral-sh/uv"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the environment at `layout`. An existing environment is kept
    /// as-is unless `overwrite` is set; a kept environment whose recorded
    /// interpreter conflicts with the requested one is an error.
    pub async fn create(&self, layout: &VenvLayout) -> Result<()> {
        Self::check_tool_installed()?;

        if layout.exists() {
            if self.overwrite {
                tokio::fs::remove_dir_all(layout.root()).await?;
            } else {
                if let (Some(requested), Some(found)) =
                    (&self.python, layout.python_version().await?)
                {
                    if !versions_compatible(requested, &found) {
                        return Err(VshError::Builder(format!(
                            "Environment at {} has Python {}, but {} was requested. Run 'vsh upgrade {}' to rebuild it.",
                            layout.root().display(),
                            found,
                            requested,
                            layout.name(),
                        )));
                    }
                }
                return Ok(());
            }
        }

        if let Some(parent) = layout.root().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let root = layout.root().to_string_lossy().to_string();
        let mut args: Vec<String> = vec!["venv".to_string()];
        if let Some(python) = &self.python {
            args.push("--python".to_string());
            args.push(python.clone());
        }
        if let Some(prompt) = &self.prompt {
            args.push("--prompt".to_string());
            args.push(prompt.clone());
        }
        if self.seed {
            args.push("--seed".to_string());
        }
        if self.system_site_packages {
            args.push("--system-site-packages".to_string());
        }
        args.push(root);

        let args_ref: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        let output = ProcessExecutor::execute("uv", &args_ref).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if self.python.is_some() && stderr.contains("No interpreter found") {
                return Err(VshError::InterpreterNotFound(
                    self.python.clone().unwrap_or_default(),
                ));
            }
            return Err(VshError::Builder(format!(
                "Failed to create virtual environment at {}: {}",
                layout.root().display(),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Deletes the environment tree. Without `force`, the directory must
/// validate as a virtual environment first.
pub async fn remove_environment(layout: &VenvLayout, force: bool) -> Result<()> {
    if !layout.exists() {
        if force {
            return Ok(());
        }
        return Err(VshError::PathNotFound(layout.root().display().to_string()));
    }

    if !force {
        layout.validate()?;
    }

    tokio::fs::remove_dir_all(layout.root()).await?;
    Ok(())
}

fn version_parts(input: &str) -> Vec<u32> {
    input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Prefix comparison between a requested interpreter spec and the version
/// recorded in pyvenv.cfg. Specs that carry no digits match anything.
pub fn versions_compatible(requested: &str, found: &str) -> bool {
    let req = version_parts(requested);
    let got = version_parts(found);

    if req.is_empty() || got.is_empty() {
        return true;
    }

    if got.len() < req.len() {
        return false;
    }

    req.iter().zip(got.iter()).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::layout::fixtures::scaffold_venv;

    #[test]
    fn compatibility_matches_major_minor() {
        assert!(versions_compatible("3.12", "3.12.1"));
        assert!(versions_compatible("python3.12", "3.12.1"));
        assert!(!versions_compatible("3.12", "3.11.9"));
        assert!(!versions_compatible("3.11", "3.10.9"));
    }

    #[test]
    fn compatibility_allows_patch_pin() {
        assert!(versions_compatible("3.12.1", "3.12.1"));
        assert!(!versions_compatible("3.12.1", "3.12.0"));
    }

    #[test]
    fn digitless_spec_matches_anything() {
        assert!(versions_compatible("pypy", "3.10.2"));
        assert!(versions_compatible("3.12", "unknown"));
    }

    #[tokio::test]
    async fn remove_refuses_non_environment_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("just-a-dir");
        std::fs::create_dir_all(&target).unwrap();

        let layout = VenvLayout::new(target.clone());
        assert!(remove_environment(&layout, false).await.is_err());
        assert!(target.exists());

        remove_environment(&layout, true).await.unwrap();
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn remove_deletes_a_valid_environment() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");
        scaffold_venv(&root, "3.12.1");

        let layout = VenvLayout::new(root.clone());
        remove_environment(&layout, false).await.unwrap();
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn remove_of_missing_path_errors_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let layout = VenvLayout::new(dir.path().join("nope"));
        assert!(remove_environment(&layout, false).await.is_err());
        assert!(remove_environment(&layout, true).await.is_ok());
    }
}
