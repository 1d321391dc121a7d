// Resource Limits - cgroup-imposed ceilings, read once at startup

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Container resource ceilings visible to the entrypoint.
///
/// Values come pre-computed from the platform (cgroup reader is an external
/// collaborator) and are validated strictly positive before any ratio math
/// is applied to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    memory_limit_bytes: u64,
    estimated_cores: u32,
}

impl ResourceLimits {
    pub fn new(memory_limit_bytes: u64, estimated_cores: u32) -> Result<Self> {
        if memory_limit_bytes == 0 {
            return Err(DomainError::InvalidMemoryLimit(memory_limit_bytes));
        }
        if estimated_cores == 0 {
            return Err(DomainError::InvalidCoreCount(estimated_cores));
        }
        Ok(Self {
            memory_limit_bytes,
            estimated_cores,
        })
    }

    pub fn memory_limit_bytes(&self) -> u64 {
        self.memory_limit_bytes
    }

    /// Memory limit in whole MiB (floor).
    pub fn memory_limit_mib(&self) -> u64 {
        self.memory_limit_bytes / BYTES_PER_MIB
    }

    pub fn estimated_cores(&self) -> u32 {
        self.estimated_cores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_memory() {
        let result = ResourceLimits::new(0, 4);
        assert!(matches!(result, Err(DomainError::InvalidMemoryLimit(0))));
    }

    #[test]
    fn test_rejects_zero_cores() {
        let result = ResourceLimits::new(1024, 0);
        assert!(matches!(result, Err(DomainError::InvalidCoreCount(0))));
    }

    #[test]
    fn test_memory_limit_mib_floors() {
        let limits = ResourceLimits::new(8 * 1024 * 1024 * 1024 + 17, 4).unwrap();
        assert_eq!(limits.memory_limit_mib(), 8192);
    }
}
