use crate::core::error::Result;
use crate::core::{ProcessExecutor, Settings};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".vshrc";
pub const RC_EXIT_FILE_NAME: &str = ".vshrc.exit";

/// Startup and teardown scripts found by the layered search.
#[derive(Debug, Default)]
pub struct RcFiles {
    pub startup: Vec<PathBuf>,
    pub teardown: Vec<PathBuf>,
}

/// Top of the repository containing `start`, probing whichever VCS is on
/// PATH.
pub async fn repo_root(start: &Path) -> Option<PathBuf> {
    let probes: [(&str, &[&str]); 2] = [
        ("git", &["rev-parse", "--show-toplevel"]),
        ("hg", &["root"]),
    ];

    for (cmd, args) in probes {
        if !ProcessExecutor::check_command_exists(cmd) {
            continue;
        }
        if let Some(stdout) = ProcessExecutor::try_stdout_in(cmd, args, start).await {
            let root = PathBuf::from(stdout.lines().next().unwrap_or("").trim());
            if root.exists() {
                return Some(root);
            }
        }
    }
    None
}

/// Runs the layered search for rc files: system path, home, repository root
/// of the invocation directory, then the environment directory. Each layer
/// may hold a startup file and a teardown file; duplicates are yielded once.
/// A fresh environment with a known repository root gets a default startup
/// file pointing at that root.
pub async fn discover(
    settings: &Settings,
    venv_path: &Path,
    invocation_dir: &Path,
) -> Result<RcFiles> {
    let mut layers: Vec<PathBuf> = Vec::new();
    if cfg!(unix) {
        layers.push(PathBuf::from("/usr/local/etc/vsh"));
    }
    layers.push(settings.home.clone());

    let root = repo_root(invocation_dir).await;
    if let Some(root) = &root {
        if layers.iter().all(|l| l != root) {
            layers.push(root.clone());
        }
    }
    if layers.iter().all(|l| l != venv_path) {
        layers.push(venv_path.to_path_buf());
    }

    if let Some(root) = &root {
        if venv_path.is_dir() && !venv_path.join(RC_FILE_NAME).exists() {
            write_default_rc(venv_path, root).await?;
        }
    }

    let mut files = RcFiles::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    for layer in layers {
        if !layer.is_dir() {
            continue;
        }
        collect(&layer.join(RC_FILE_NAME), &mut files.startup, &mut seen);
        collect(&layer.join(RC_EXIT_FILE_NAME), &mut files.teardown, &mut seen);
    }

    Ok(files)
}

fn collect(candidate: &Path, out: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    if !usable_on_platform(candidate) {
        return;
    }

    if candidate.is_file() {
        if seen.insert(candidate.to_path_buf()) {
            out.push(candidate.to_path_buf());
        }
    } else if candidate.is_dir() {
        let entries = match std::fs::read_dir(candidate) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        let mut inner: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && usable_on_platform(p))
            .collect();
        inner.sort();
        for path in inner {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }
}

fn usable_on_platform(path: &Path) -> bool {
    if cfg!(windows) {
        // PowerShell dot-sourcing chokes on UNC paths and unquoted spaces
        let text = path.to_string_lossy();
        if text.starts_with(r"\\") || text.contains(' ') {
            return false;
        }
    }
    true
}

/// Writes a startup file that cds into `working`. No-op when the
/// environment directory is missing, a startup file already exists, or
/// `working` is not a directory.
pub async fn write_default_rc(venv_path: &Path, working: &Path) -> Result<Option<PathBuf>> {
    let rc_path = venv_path.join(RC_FILE_NAME);
    if !venv_path.is_dir() || rc_path.exists() || !working.is_dir() {
        return Ok(None);
    }

    tokio::fs::write(&rc_path, format!("cd {}\n", working.display())).await?;
    tracing::debug!("Wrote default startup file {}", rc_path.display());
    Ok(Some(rc_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(home: &Path) -> Settings {
        Settings {
            home: home.to_path_buf(),
            workon_home: home.join(".virtualenvs"),
            shell: PathBuf::from("/bin/sh"),
            path: String::new(),
            ps1: None,
            prompt: None,
        }
    }

    #[tokio::test]
    async fn finds_home_and_venv_layers_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let venv = dir.path().join("envs/proj");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&venv).unwrap();

        std::fs::write(home.join(RC_FILE_NAME), "echo home\n").unwrap();
        std::fs::write(venv.join(RC_FILE_NAME), "echo venv\n").unwrap();

        let files = discover(&test_settings(&home), &venv, dir.path())
            .await
            .unwrap();

        assert_eq!(
            files.startup,
            vec![home.join(RC_FILE_NAME), venv.join(RC_FILE_NAME)]
        );
        assert!(files.teardown.is_empty());
    }

    #[tokio::test]
    async fn teardown_files_are_collected_separately() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let venv = dir.path().join("envs/proj");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&venv).unwrap();

        std::fs::write(venv.join(RC_FILE_NAME), "echo up\n").unwrap();
        std::fs::write(venv.join(RC_EXIT_FILE_NAME), "echo down\n").unwrap();

        let files = discover(&test_settings(&home), &venv, dir.path())
            .await
            .unwrap();

        assert_eq!(files.startup, vec![venv.join(RC_FILE_NAME)]);
        assert_eq!(files.teardown, vec![venv.join(RC_EXIT_FILE_NAME)]);
    }

    #[tokio::test]
    async fn rc_directory_yields_sorted_contents() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let venv = dir.path().join("envs/proj");
        std::fs::create_dir_all(home.join(RC_FILE_NAME)).unwrap();
        std::fs::create_dir_all(&venv).unwrap();

        std::fs::write(home.join(RC_FILE_NAME).join("20-path"), "").unwrap();
        std::fs::write(home.join(RC_FILE_NAME).join("10-aliases"), "").unwrap();

        let files = discover(&test_settings(&home), &venv, dir.path())
            .await
            .unwrap();

        assert_eq!(
            files.startup,
            vec![
                home.join(RC_FILE_NAME).join("10-aliases"),
                home.join(RC_FILE_NAME).join("20-path"),
            ]
        );
    }

    #[tokio::test]
    async fn default_rc_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let venv = dir.path().join("envs/proj");
        let working = dir.path().join("src");
        std::fs::create_dir_all(&venv).unwrap();
        std::fs::create_dir_all(&working).unwrap();

        let written = write_default_rc(&venv, &working).await.unwrap();
        assert_eq!(written, Some(venv.join(RC_FILE_NAME)));

        let content = std::fs::read_to_string(venv.join(RC_FILE_NAME)).unwrap();
        assert!(content.starts_with("cd "));
        assert!(content.contains("src"));

        // Second call leaves the existing file alone
        let again = write_default_rc(&venv, &working).await.unwrap();
        assert_eq!(again, None);
    }

    #[tokio::test]
    async fn default_rc_requires_an_existing_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let venv = dir.path().join("envs/proj");
        std::fs::create_dir_all(&venv).unwrap();

        let written = write_default_rc(&venv, &dir.path().join("missing"))
            .await
            .unwrap();
        assert_eq!(written, None);
        assert!(!venv.join(RC_FILE_NAME).exists());
    }
}
