use crate::core::error::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid simulation configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Engine operation '{operation}' failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
