use crate::config::VenvConfig;
use crate::core::Settings;
use crate::shell::prompt::{
    escape_zero_length_codes, prompt_var_for, venv_tag, DEFAULT_PROMPT,
};
use crate::venv::VenvLayout;
use std::collections::HashMap;

/// Builds the subshell's environment, mirroring what an `activate` script
/// would do: inherit everything, mark the environment, put its bin first on
/// PATH, apply configured overrides, rewrite the prompt.
pub fn activation_env(config: &VenvConfig, settings: &Settings) -> HashMap<String, String> {
    let mut env: HashMap<String, String> = std::env::vars().collect();

    env.insert("VSH".to_string(), config.venv.name.clone());
    env.insert(
        "VIRTUAL_ENV".to_string(),
        config.venv.path.display().to_string(),
    );

    let bin_dir = VenvLayout::new(config.venv.path.clone()).bin_dir();
    let separator = if cfg!(windows) { ";" } else { ":" };
    let original_path = env.get("PATH").cloned().unwrap_or_default();
    env.insert(
        "PATH".to_string(),
        format!("{}{}{}", bin_dir.display(), separator, original_path),
    );

    for (key, value) in &config.environment {
        env.insert(key.clone(), value.clone());
    }

    if !env.contains_key("VIRTUAL_ENV_DISABLE_PROMPT") {
        update_prompt(&mut env, config, settings);
    }

    env
}

fn update_prompt(env: &mut HashMap<String, String>, config: &VenvConfig, settings: &Settings) {
    let shell_name = config
        .shell_path(settings)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "sh".to_string());

    let Some(var) = prompt_var_for(&shell_name) else {
        return;
    };

    let existing = env.get(var).cloned().or_else(|| match var {
        "PS1" => settings.ps1.clone(),
        _ => settings.prompt.clone(),
    });

    let tag = venv_tag(&config.venv.name);
    let prompt = match shell_name.as_str() {
        // Already-escaped default; everything else gets the wrap pass
        "bash" | "sh" => match existing {
            Some(base) => escape_zero_length_codes(&format!("{} {}", tag, base)),
            None => format!("{} {}", escape_zero_length_codes(&tag), DEFAULT_PROMPT),
        },
        _ => format!("{} {}", tag, existing.unwrap_or_else(|| DEFAULT_PROMPT.to_string())),
    };

    env.insert(var.to_string(), prompt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn test_config(path: &Path) -> VenvConfig {
        VenvConfig::new("proj", path)
    }

    fn test_settings(shell: &str) -> Settings {
        Settings {
            home: PathBuf::from("/home/u"),
            workon_home: PathBuf::from("/home/u/.virtualenvs"),
            shell: PathBuf::from(shell),
            path: String::new(),
            ps1: None,
            prompt: None,
        }
    }

    #[test]
    fn marks_the_environment() {
        let config = test_config(Path::new("/tmp/envs/proj"));
        let env = activation_env(&config, &test_settings("/bin/sh"));

        assert_eq!(env.get("VSH").map(String::as_str), Some("proj"));
        assert_eq!(
            env.get("VIRTUAL_ENV").map(String::as_str),
            Some("/tmp/envs/proj")
        );
    }

    #[test]
    fn prepends_bin_to_path() {
        let config = test_config(Path::new("/tmp/envs/proj"));
        let env = activation_env(&config, &test_settings("/bin/sh"));

        let path = env.get("PATH").unwrap();
        #[cfg(not(windows))]
        assert!(path.starts_with("/tmp/envs/proj/bin:"));
    }

    #[test]
    fn configured_overrides_win() {
        let mut config = test_config(Path::new("/tmp/envs/proj"));
        config
            .environment
            .insert("VSH_TEST_OVERRIDE".to_string(), "configured".to_string());

        let env = activation_env(&config, &test_settings("/bin/sh"));
        assert_eq!(
            env.get("VSH_TEST_OVERRIDE").map(String::as_str),
            Some("configured")
        );
    }

    #[test]
    fn prompt_is_tagged_for_known_shells() {
        let config = test_config(Path::new("/tmp/envs/proj"));

        let env = activation_env(&config, &test_settings("/bin/bash"));
        assert!(env.get("PS1").unwrap().contains("proj"));

        let env = activation_env(&config, &test_settings("/usr/bin/zsh"));
        assert!(env.get("PROMPT").unwrap().contains("proj"));
    }

    #[test]
    fn disable_flag_skips_prompt_rewrite() {
        let mut config = test_config(Path::new("/tmp/envs/proj"));
        config
            .environment
            .insert("VIRTUAL_ENV_DISABLE_PROMPT".to_string(), "1".to_string());

        let env = activation_env(&config, &test_settings("/bin/bash"));
        assert!(!env
            .get("PS1")
            .map(|p| p.contains("\x1b[33mproj"))
            .unwrap_or(false));
    }
}
