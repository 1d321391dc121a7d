// Environment Lookup Port (for testability)

/// Environment lookup interface (allows fixture maps in tests).
///
/// Absence is distinct from an empty value: `lookup` returns `None` only
/// when the key is not present at all.
pub trait EnvLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Process environment lookup (production)
pub struct SystemEnv;

impl EnvLookup for SystemEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Test doubles for the environment port
pub mod mocks {
    use super::EnvLookup;
    use std::collections::HashMap;

    /// Deterministic lookup backed by a fixture map
    pub struct MapEnv {
        vars: HashMap<String, String>,
    }

    impl MapEnv {
        pub fn new(vars: HashMap<String, String>) -> Self {
            Self { vars }
        }

        pub fn empty() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }
    }

    impl EnvLookup for MapEnv {
        fn lookup(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }

    impl<const N: usize> From<[(&str, &str); N]> for MapEnv {
        fn from(pairs: [(&str, &str); N]) -> Self {
            Self::new(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }
}
