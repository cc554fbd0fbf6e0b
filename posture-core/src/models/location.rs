//! Source locations for endpoints and findings.

use serde::{Deserialize, Serialize};

/// Where a declaration lives in the scanned source tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based line number; 0 when the provider could not supply one.
    pub line: u32,
    pub column: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
        }
    }

    pub fn with_column(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column: Some(column),
        }
    }

    /// Strip a base directory prefix, for report-friendly paths.
    pub fn relative_to(&self, base: &str) -> &str {
        match self.file.strip_prefix(base) {
            Some(rest) => rest.trim_start_matches(['/', '\\']),
            None => &self.file,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(f, "{}:{}:{}", self.file, self.line, col),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_column_only_when_known() {
        assert_eq!(SourceLocation::new("A.java", 3).to_string(), "A.java:3");
        assert_eq!(
            SourceLocation::with_column("A.java", 3, 7).to_string(),
            "A.java:3:7"
        );
    }

    #[test]
    fn relative_to_strips_base_prefix() {
        let location = SourceLocation::new("/proj/src/A.java", 3);
        assert_eq!(location.relative_to("/proj"), "src/A.java");
        assert_eq!(location.relative_to("/other"), "/proj/src/A.java");
    }
}
