// Application Descriptor - static baseline options from the platform

use serde::{Deserialize, Serialize};

/// Read-only baseline JVM options shipped with the application image.
///
/// Parsed by the platform tooling (descriptor parsing is an external
/// collaborator); the pipeline only ever reads `java_options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(rename = "javaOptions", default)]
    pub java_options: String,
}

impl Descriptor {
    pub fn new(java_options: impl Into<String>) -> Self {
        Self {
            java_options: java_options.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_java_options_key() {
        let desc: Descriptor =
            serde_json::from_str(r#"{"javaOptions": "-Dfoo=bar"}"#).unwrap();
        assert_eq!(desc.java_options, "-Dfoo=bar");
    }

    #[test]
    fn test_missing_options_default_to_empty() {
        let desc: Descriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(desc.java_options, "");
    }
}
