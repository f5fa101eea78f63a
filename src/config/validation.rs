use crate::core::error::{Result, VshError};

pub fn validate_venv_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VshError::InvalidName(
            "environment name cannot be empty".to_string(),
        ));
    }

    if name.starts_with('-') {
        return Err(VshError::InvalidName(format!(
            "environment names may not start with '-': {}",
            name
        )));
    }

    if name.chars().any(|c| c.is_whitespace()) {
        return Err(VshError::InvalidName(format!(
            "environment names may not include spaces: {}",
            name
        )));
    }

    if name.chars().any(|c| c == '/' || c == '\\') {
        return Err(VshError::InvalidName(format!(
            "environment names may not include path separators: {}",
            name
        )));
    }

    Ok(())
}
