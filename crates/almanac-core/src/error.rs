use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
