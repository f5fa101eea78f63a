use crate::core::error::{Result, VshError};
use std::path::{Path, PathBuf};

/// On-disk layout of a single virtual environment.
#[derive(Debug, Clone)]
pub struct VenvLayout {
    root: PathBuf,
}

impl VenvLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    pub fn executable_path(&self, command: &str) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join(format!("{}.exe", command))
        } else {
            self.bin_dir().join(command)
        }
    }

    pub fn python_path(&self) -> PathBuf {
        self.executable_path("python")
    }

    pub fn pyvenv_cfg(&self) -> PathBuf {
        self.root.join("pyvenv.cfg")
    }

    /// The `site-packages` directory, wherever the interpreter placed it.
    pub fn site_packages(&self) -> Option<PathBuf> {
        if cfg!(windows) {
            let candidate = self.root.join("Lib").join("site-packages");
            return candidate.is_dir().then_some(candidate);
        }

        let lib_dir = self.root.join("lib");
        for entry in std::fs::read_dir(lib_dir).ok()?.flatten() {
            let candidate = entry.path().join("site-packages");
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
        None
    }

    fn activation_script_present(&self) -> bool {
        let entries = match std::fs::read_dir(self.bin_dir()) {
            Ok(entries) => entries,
            Err(_) => return false,
        };
        entries.flatten().any(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("activate")
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(VshError::PathNotFound(self.root.display().to_string()));
        }

        if !self.pyvenv_cfg().is_file() {
            return Err(VshError::InvalidEnvironment(format!(
                "missing pyvenv.cfg under {}",
                self.root.display()
            )));
        }

        if !self.bin_dir().is_dir() {
            return Err(VshError::InvalidEnvironment(format!(
                "missing {} under {}",
                if cfg!(windows) { "Scripts" } else { "bin" },
                self.root.display()
            )));
        }

        if self.site_packages().is_none() {
            return Err(VshError::InvalidEnvironment(format!(
                "missing site-packages under {}",
                self.root.display()
            )));
        }

        if !cfg!(windows) {
            if !self.activation_script_present() {
                return Err(VshError::InvalidEnvironment(format!(
                    "missing activation scripts under {}",
                    self.root.display()
                )));
            }

            if !self.python_path().exists() {
                return Err(VshError::InvalidEnvironment(format!(
                    "missing python executable under {}",
                    self.root.display()
                )));
            }
        }

        Ok(())
    }

    /// Interpreter version recorded in pyvenv.cfg, if any.
    pub async fn python_version(&self) -> Result<Option<String>> {
        let cfg_path = self.pyvenv_cfg();
        if !cfg_path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(cfg_path).await?;
        for line in content.lines() {
            let line = line.trim();
            if let Some(v) = line.strip_prefix("version =") {
                return Ok(Some(v.trim().to_string()));
            }
            if let Some(v) = line.strip_prefix("version_info =") {
                return Ok(Some(v.trim().to_string()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    /// Lays out the files a real interpreter build would create, enough to
    /// pass validation.
    pub fn scaffold_venv(root: &Path, python_version: &str) {
        let bin = if cfg!(windows) {
            root.join("Scripts")
        } else {
            root.join("bin")
        };
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(
            root.join("pyvenv.cfg"),
            format!("home = /usr/bin\nversion = {}\n", python_version),
        )
        .unwrap();
        std::fs::write(bin.join("activate"), "").unwrap();
        std::fs::write(bin.join("python"), "").unwrap();

        let site_packages = if cfg!(windows) {
            root.join("Lib").join("site-packages")
        } else {
            root.join("lib")
                .join(format!(
                    "python{}",
                    python_version.rsplit_once('.').map(|(mm, _)| mm).unwrap_or(python_version)
                ))
                .join("site-packages")
        };
        std::fs::create_dir_all(site_packages).unwrap();
    }
}
