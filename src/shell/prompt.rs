use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a color directive either as the literal text bash keeps in PS1
/// (`\e[34m`) or as a raw escape byte sequence.
static ANSI_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"((?:\\e|\\xb1|\x1b)\[[^m]*m)").unwrap());

/// Fallback prompt when the caller has none set.
pub const DEFAULT_PROMPT: &str = r"\[\e[34m\]\w\[\e[0m\] \[\e[33m\]\$\[\e[0m\] ";

/// Wraps ANSI color directives in `\[`/`\]` zero-length markers. Bash
/// miscounts the command-line length otherwise, which corrupts history
/// editing under tmux.
pub fn escape_zero_length_codes(prompt: &str) -> String {
    ANSI_DIRECTIVE.replace_all(prompt, r"\[$1\]").to_string()
}

/// Prompt variable consulted by the given shell, if the shell is one the
/// prompt rewrite understands.
pub fn prompt_var_for(shell_name: &str) -> Option<&'static str> {
    match shell_name {
        "bash" | "sh" => Some("PS1"),
        "zsh" => Some("PROMPT"),
        _ => None,
    }
}

/// Colored `venv <name>` marker prepended to the prompt.
pub fn venv_tag(name: &str) -> String {
    format!("\x1b[35mvenv\x1b[0m \x1b[33m{}\x1b[0m", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_directives_are_wrapped() {
        let escaped = escape_zero_length_codes(r"\e[34m\w\e[0m $ ");
        assert_eq!(escaped, r"\[\e[34m\]\w\[\e[0m\] $ ");
    }

    #[test]
    fn raw_escape_bytes_are_wrapped() {
        let escaped = escape_zero_length_codes("\x1b[33mproj\x1b[0m $ ");
        assert_eq!(escaped, "\\[\x1b[33m\\]proj\\[\x1b[0m\\] $ ");
    }

    #[test]
    fn plain_prompts_pass_through() {
        assert_eq!(escape_zero_length_codes("$ "), "$ ");
    }

    #[test]
    fn prompt_variable_depends_on_shell() {
        assert_eq!(prompt_var_for("bash"), Some("PS1"));
        assert_eq!(prompt_var_for("sh"), Some("PS1"));
        assert_eq!(prompt_var_for("zsh"), Some("PROMPT"));
        assert_eq!(prompt_var_for("fish"), None);
    }

    #[test]
    fn tag_carries_the_environment_name() {
        assert!(venv_tag("proj").contains("proj"));
    }
}
