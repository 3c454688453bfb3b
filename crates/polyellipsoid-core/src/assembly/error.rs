use super::packing::PackingError;
use crate::core::error::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Invalid system configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Packing failed: {0}")]
    Packing(#[from] PackingError),
}
