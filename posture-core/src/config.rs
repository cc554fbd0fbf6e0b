//! Scanner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::Severity;

/// Configuration for a scan, typically loaded from `posture.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PostureConfig {
    /// Glob patterns excluded from the walk, in addition to the built-in
    /// skip list (build output, VCS metadata, test trees).
    pub exclude: Vec<String>,
    /// Rule ids to disable (`AP001`, ...).
    pub disabled_rules: Vec<String>,
    /// Minimum severity for reported findings. Default: info.
    pub min_severity: Option<Severity>,
    /// Include test source trees in the walk. Default: false.
    pub include_tests: Option<bool>,
}

impl PostureConfig {
    /// Returns the effective severity threshold, defaulting to `Info`.
    pub fn effective_min_severity(&self) -> Severity {
        self.min_severity.unwrap_or(Severity::Info)
    }

    /// Returns whether test trees are scanned, defaulting to false.
    pub fn effective_include_tests(&self) -> bool {
        self.include_tests.unwrap_or(false)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let config = PostureConfig::default();
        assert_eq!(config.effective_min_severity(), Severity::Info);
        assert!(!config.effective_include_tests());
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn parses_partial_toml() {
        let config = PostureConfig::from_toml(
            r#"
            exclude = ["**/generated/**"]
            disabled_rules = ["AP005"]
            min_severity = "medium"
            "#,
        )
        .unwrap();
        assert_eq!(config.exclude, vec!["**/generated/**"]);
        assert_eq!(config.disabled_rules, vec!["AP005"]);
        assert_eq!(config.effective_min_severity(), Severity::Medium);
    }
}
