use crate::core::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenvConfig {
    pub venv: VenvMeta,
    /// Environment-variable overrides applied when entering the environment.
    /// An override wins over the inherited value.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenvMeta {
    pub name: String,
    pub path: PathBuf,
    /// Startup folder used as the subshell's working directory.
    #[serde(default)]
    pub working_path: Option<PathBuf>,
    #[serde(default)]
    pub interpreter: Option<PathBuf>,
    #[serde(default)]
    pub shell: Option<PathBuf>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl VenvConfig {
    pub fn new(name: &str, path: &Path) -> Self {
        Self {
            venv: VenvMeta {
                name: name.to_string(),
                path: path.to_path_buf(),
                working_path: None,
                interpreter: None,
                shell: None,
                version: default_version(),
            },
            environment: BTreeMap::new(),
        }
    }

    /// Shell to launch for this environment: the configured one, or the
    /// caller's shell from the process environment.
    pub fn shell_path(&self, settings: &Settings) -> PathBuf {
        self.venv
            .shell
            .clone()
            .filter(|p| p.exists())
            .unwrap_or_else(|| settings.shell.clone())
    }
}
