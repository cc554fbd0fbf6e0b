//! Rule findings and severity levels.

use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;

/// Finding severity. Derived `Ord` gives `Info < Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::Info,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_at_least(self, min: Severity) -> bool {
        self >= min
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation tied to one endpoint. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    pub endpoint: Endpoint,
    pub recommendation: String,
}

impl Finding {
    /// `"[AP001] Public without explicit intent"`-style identifier.
    pub fn identifier(&self) -> String {
        format!("[{}] {}", self.rule_id, self.rule_name)
    }

    /// `file:line` of the violating endpoint.
    pub fn location(&self) -> String {
        self.endpoint.location.to_string()
    }
}
