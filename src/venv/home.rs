use crate::config::validate_venv_name;
use crate::core::error::{Result, VshError};
use crate::core::{absolutize, looks_like_path, Settings};
use crate::venv::layout::VenvLayout;
use std::path::{Path, PathBuf};

/// Resolves a CLI argument into an environment name and directory. Plain
/// names land under the environments home; path-like arguments are expanded
/// and the name becomes the final component.
pub fn resolve_target(arg: &str, settings: &Settings) -> Result<(String, PathBuf)> {
    if looks_like_path(arg) {
        let cwd = std::env::current_dir()?;
        let path = absolutize(arg, &settings.home, &cwd);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                VshError::InvalidName(format!("cannot derive an environment name from {}", arg))
            })?;
        validate_venv_name(&name)?;
        Ok((name, path))
    } else {
        validate_venv_name(arg)?;
        Ok((arg.to_string(), settings.workon_home.join(arg)))
    }
}

/// Walks `root` for virtual environments. A directory that validates as an
/// environment is reported and not descended into; symlinked directories are
/// skipped. Results are sorted by name.
pub fn find_environments(root: &Path) -> Vec<(String, PathBuf)> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            if VenvLayout::new(path.clone()).is_valid() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    found.push((name.to_string(), path));
                }
            } else {
                stack.push(path);
            }
        }
    }

    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::layout::fixtures::scaffold_venv;

    fn test_settings(home: &Path, workon_home: &Path) -> Settings {
        Settings {
            home: home.to_path_buf(),
            workon_home: workon_home.to_path_buf(),
            shell: PathBuf::from("/bin/sh"),
            path: String::new(),
            ps1: None,
            prompt: None,
        }
    }

    #[test]
    fn plain_name_resolves_under_workon_home() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path(), &dir.path().join("envs"));

        let (name, path) = resolve_target("proj", &settings).unwrap();
        assert_eq!(name, "proj");
        assert_eq!(path, dir.path().join("envs").join("proj"));
    }

    #[test]
    fn path_argument_keeps_final_component_as_name() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path(), &dir.path().join("envs"));

        let (name, path) = resolve_target("~/elsewhere/proj", &settings).unwrap();
        assert_eq!(name, "proj");
        assert_eq!(path, dir.path().join("elsewhere").join("proj"));
    }

    #[test]
    fn option_like_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path(), &dir.path().join("envs"));
        assert!(resolve_target("-r", &settings).is_err());
    }

    #[test]
    fn discovery_finds_environments_and_prunes_them() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("envs");

        scaffold_venv(&home.join("alpha"), "3.12.1");
        scaffold_venv(&home.join("nested").join("beta"), "3.11.9");
        // A venv-shaped dir inside a venv must not be reported
        scaffold_venv(&home.join("alpha").join("inner"), "3.12.1");
        std::fs::create_dir_all(home.join("not-a-venv")).unwrap();

        let found = find_environments(&home);
        let names: Vec<&str> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn discovery_of_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_environments(&dir.path().join("nope")).is_empty());
    }
}
