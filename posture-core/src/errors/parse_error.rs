//! Syntax-provider errors.

/// Errors from the syntax provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The provider could not produce a usable declaration tree for a file.
    /// The file is skipped and recorded; never fatal to the scan.
    #[error("Unresolvable syntax unit {file}: {reason}")]
    UnresolvableSyntaxUnit { file: String, reason: String },

    #[error("Could not read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}
