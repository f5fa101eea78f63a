use std::path::PathBuf;

/// Snapshot of the process environment variables the tool keys off.
#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    pub workon_home: PathBuf,
    pub shell: PathBuf,
    pub path: String,
    pub ps1: Option<String>,
    pub prompt: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        let workon_home = std::env::var_os("WORKON_HOME")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| home.join(".virtualenvs"));

        let shell = default_shell();

        let path = std::env::var("PATH").unwrap_or_default();
        let ps1 = std::env::var("PS1").ok().filter(|v| !v.is_empty());
        let prompt = std::env::var("PROMPT").ok().filter(|v| !v.is_empty());

        Self {
            home,
            workon_home,
            shell,
            path,
            ps1,
            prompt,
        }
    }

    /// Final component of the shell path, e.g. "zsh" for /bin/zsh.
    pub fn shell_name(&self) -> String {
        self.shell
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "sh".to_string())
    }
}

#[cfg(windows)]
fn default_shell() -> PathBuf {
    PathBuf::from(std::env::var("COMSPEC").unwrap_or_else(|_| "powershell.exe".to_string()))
}

#[cfg(not(windows))]
fn default_shell() -> PathBuf {
    std::env::var_os("SHELL")
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from("/bin/sh"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_name_is_final_component() {
        let mut settings = Settings::from_env();
        settings.shell = PathBuf::from("/usr/local/bin/zsh");
        assert_eq!(settings.shell_name(), "zsh");
    }

    #[test]
    fn workon_home_defaults_under_home() {
        let settings = Settings::from_env();
        if std::env::var_os("WORKON_HOME").is_none() {
            assert_eq!(settings.workon_home, settings.home.join(".virtualenvs"));
        }
    }
}
