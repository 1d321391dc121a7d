// Domain Layer - Pure values read once at startup

pub mod descriptor;
pub mod error;
pub mod limits;

// Re-exports
pub use descriptor::Descriptor;
pub use error::DomainError;
pub use limits::ResourceLimits;
