use std::path::{Path, PathBuf};

/// True when a CLI argument should be treated as a filesystem path rather
/// than an environment name.
pub fn looks_like_path(arg: &str) -> bool {
    arg.contains('/')
        || arg.contains(std::path::MAIN_SEPARATOR)
        || arg.starts_with('~')
        || arg.starts_with('.')
}

/// Expands a leading `~` against `home` and makes the result absolute
/// against `cwd`. No symlink resolution; the path does not have to exist.
pub fn absolutize(raw: &str, home: &Path, cwd: &Path) -> PathBuf {
    let expanded = if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_not_paths() {
        assert!(!looks_like_path("proj"));
        assert!(!looks_like_path("proj-3.12"));
        assert!(looks_like_path("./proj"));
        assert!(looks_like_path("~/envs/proj"));
        assert!(looks_like_path("/opt/envs/proj"));
        assert!(looks_like_path("envs/proj"));
    }

    #[test]
    fn tilde_expands_against_home() {
        let home = Path::new("/home/u");
        let cwd = Path::new("/tmp");
        assert_eq!(
            absolutize("~/envs/proj", home, cwd),
            PathBuf::from("/home/u/envs/proj")
        );
        assert_eq!(absolutize("~", home, cwd), PathBuf::from("/home/u"));
    }

    #[test]
    fn relative_resolves_against_cwd() {
        let home = Path::new("/home/u");
        let cwd = Path::new("/work");
        assert_eq!(
            absolutize("./proj", home, cwd),
            PathBuf::from("/work/./proj")
        );
        assert_eq!(absolutize("/abs", home, cwd), PathBuf::from("/abs"));
    }
}
