//! Rule-evaluation errors.

/// Errors that can occur during rule evaluation.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A rule panicked on a single endpoint. That (rule, endpoint) pair is
    /// skipped and surfaced as a diagnostic; the scan continues.
    #[error("Rule {rule_id} panicked on endpoint '{endpoint}': {message}")]
    RulePanic {
        rule_id: String,
        endpoint: String,
        message: String,
    },

    #[error("Duplicate rule id registered: {0}")]
    DuplicateId(String),
}
