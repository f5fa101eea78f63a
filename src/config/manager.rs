use crate::config::schema::VenvConfig;
use crate::config::validation::validate_venv_name;
use crate::core::error::{Result, VshError};
use crate::core::Settings;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Owns the directory of per-environment configuration files, one TOML file
/// per environment name.
pub struct VenvConfigManager {
    config_dir: PathBuf,
}

impl VenvConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: Self::get_config_dir()?,
        })
    }

    /// Manager rooted at an explicit directory. Used by tests and by the
    /// ephemeral cleanup path, which must not re-resolve the platform dirs.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "vsh", "vsh") {
            Ok(proj_dirs.config_dir().to_path_buf())
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Ok(PathBuf::from(home).join(".vsh"))
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{}.toml", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.config_path(name).exists()
    }

    pub async fn load(&self, name: &str) -> Result<VenvConfig> {
        validate_venv_name(name)?;

        let path = self.config_path(name);
        if !path.exists() {
            return Err(VshError::Config(format!(
                "No configuration found for environment '{}'",
                name
            )));
        }

        let content = fs::read_to_string(&path).await?;
        let mut config: VenvConfig = toml::from_str(&content)?;
        validate_venv_name(&config.venv.name)?;

        // Stored paths that no longer exist are dropped rather than
        // propagated into the session.
        if let Some(working) = &config.venv.working_path {
            if !working.is_dir() {
                tracing::debug!(
                    "Dropping stale working path {} for '{}'",
                    working.display(),
                    name
                );
                config.venv.working_path = None;
            }
        }
        if let Some(interpreter) = &config.venv.interpreter {
            if !interpreter.exists() {
                config.venv.interpreter = None;
            }
        }

        Ok(config)
    }

    /// Loads the configuration for `name`, creating and persisting a fresh
    /// one when no file exists yet.
    pub async fn load_or_create(
        &self,
        name: &str,
        venv_path: &Path,
        settings: &Settings,
    ) -> Result<VenvConfig> {
        if self.exists(name) {
            return self.load(name).await;
        }

        let mut config = VenvConfig::new(name, venv_path);
        config.venv.shell = Some(settings.shell.clone());
        self.save(&config).await?;
        Ok(config)
    }

    pub async fn save(&self, config: &VenvConfig) -> Result<()> {
        validate_venv_name(&config.venv.name)?;
        fs::create_dir_all(&self.config_dir).await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(self.config_path(&config.venv.name), content).await?;
        Ok(())
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let path = self.config_path(name);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}
