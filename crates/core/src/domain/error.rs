// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Memory limit must be strictly positive, got {0}")]
    InvalidMemoryLimit(u64),

    #[error("Estimated core count must be strictly positive, got {0}")]
    InvalidCoreCount(u32),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
