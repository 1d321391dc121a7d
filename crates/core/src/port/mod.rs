// Port Layer - Interfaces for external dependencies

pub mod env_lookup; // For deterministic testing

// Re-exports
pub use env_lookup::{EnvLookup, SystemEnv};
