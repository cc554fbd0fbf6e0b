//! Non-fatal diagnostic collection.
//!
//! Modeled as an accumulator the pipeline threads through its stages:
//! partial results are still returned when individual files or rule
//! evaluations fail.

use serde::{Deserialize, Serialize};

/// An expression-marker whose text matched no recognized fragment. The
/// endpoint was still treated as requiring authorization (conservative
/// default); this record is the only trace that specifics were lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedExpression {
    pub file: String,
    pub line: u32,
    pub expression: String,
}

/// A file the syntax provider could not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// A single (rule, endpoint) evaluation that panicked and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFault {
    pub rule_id: String,
    pub endpoint: String,
    pub message: String,
}

/// Everything non-fatal that happened during a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanDiagnostics {
    pub malformed_expressions: Vec<MalformedExpression>,
    pub skipped_files: Vec<SkippedFile>,
    pub rule_faults: Vec<RuleFault>,
}

impl ScanDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.malformed_expressions.is_empty()
            && self.skipped_files.is_empty()
            && self.rule_faults.is_empty()
    }

    pub fn record_malformed_expression(&mut self, file: &str, line: u32, expression: &str) {
        self.malformed_expressions.push(MalformedExpression {
            file: file.to_string(),
            line,
            expression: expression.to_string(),
        });
    }

    pub fn record_skipped_file(&mut self, file: &str, reason: &str) {
        self.skipped_files.push(SkippedFile {
            file: file.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn record_rule_fault(&mut self, rule_id: &str, endpoint: &str, message: &str) {
        self.rule_faults.push(RuleFault {
            rule_id: rule_id.to_string(),
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        });
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: ScanDiagnostics) {
        self.malformed_expressions
            .extend(other.malformed_expressions);
        self.skipped_files.extend(other.skipped_files);
        self.rule_faults.extend(other.rule_faults);
    }
}
