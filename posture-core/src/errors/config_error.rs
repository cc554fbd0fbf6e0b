//! Configuration errors.

use std::path::PathBuf;

/// Errors loading or validating scanner configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(#[from] toml::de::Error),

    #[error("Unknown rule id in disabled_rules: {0}")]
    UnknownRuleId(String),
}
