use thiserror::Error;

#[derive(Error, Debug)]
pub enum VshError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid environment name: {0}")]
    InvalidName(String),

    #[error("Path is not a valid virtual environment: {0}")]
    InvalidEnvironment(String),

    #[error("Could not find path: {0}")]
    PathNotFound(String),

    #[error("Could not find interpreter for: {0}")]
    InterpreterNotFound(String),

    #[error("Environment builder error: {0}")]
    Builder(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VshError>;
