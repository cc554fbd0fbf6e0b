//! Rule engine — ordered evaluation, severity filtering, deterministic
//! ranking.

use std::cmp::Reverse;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use posture_core::config::PostureConfig;
use posture_core::errors::{ConfigError, RuleError, ScanDiagnostics};
use posture_core::models::{Endpoint, Finding, ScanResult, Severity};

use crate::analyzer::AnalysisOutcome;

use super::catalog;
use super::SecurityRule;

/// Caller-owned rule engine: an ordered rule list, a disabled-id set, and a
/// minimum severity threshold. Not a process-wide singleton; register all
/// rules before scanning.
pub struct RuleEngine {
    rules: Vec<Arc<dyn SecurityRule>>,
    disabled: FxHashSet<String>,
    min_severity: Severity,
}

impl RuleEngine {
    /// Engine with the built-in catalog (AP001..AP008) in order.
    pub fn new() -> Self {
        Self {
            rules: catalog::builtin_rules(),
            disabled: FxHashSet::default(),
            min_severity: Severity::Info,
        }
    }

    /// Engine with no rules at all; everything registered explicitly.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            disabled: FxHashSet::default(),
            min_severity: Severity::Info,
        }
    }

    /// Built-in catalog with config-driven disables and threshold applied.
    pub fn from_config(config: &PostureConfig) -> Self {
        let mut engine = Self::new();
        for id in &config.disabled_rules {
            engine.disable_rule(id);
        }
        engine.set_minimum_severity(config.effective_min_severity());
        engine
    }

    /// Check that every disabled id in the configuration names a rule this
    /// engine knows about.
    pub fn validate_config(&self, config: &PostureConfig) -> Result<(), ConfigError> {
        for id in &config.disabled_rules {
            if self.rule(id).is_none() {
                return Err(ConfigError::UnknownRuleId(id.clone()));
            }
        }
        Ok(())
    }

    /// Append a rule after the current catalog. Evaluation order is
    /// registration order; ids must be unique across the engine.
    pub fn add_rule(&mut self, rule: Arc<dyn SecurityRule>) -> Result<(), RuleError> {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            return Err(RuleError::DuplicateId(rule.id().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn disable_rule(&mut self, rule_id: &str) {
        self.disabled.insert(rule_id.to_string());
    }

    pub fn enable_rule(&mut self, rule_id: &str) {
        self.disabled.remove(rule_id);
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.disabled.contains(rule_id)
    }

    /// Minimum severity kept in results. Default: `Info`.
    pub fn set_minimum_severity(&mut self, severity: Severity) {
        self.min_severity = severity;
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn SecurityRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn rule(&self, rule_id: &str) -> Option<&dyn SecurityRule> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .map(|r| r.as_ref())
    }

    /// Evaluate every enabled rule against every endpoint.
    ///
    /// (rule, endpoint) pairs are independent, so endpoints are evaluated in
    /// parallel per rule; results are merged back in discovery order before
    /// the final deterministic sort: severity descending, rule id ascending,
    /// then endpoint discovery order (the sort is stable and findings are
    /// produced in that order).
    ///
    /// A rule that panics on one endpoint skips only that pair; the fault is
    /// recorded as a diagnostic and the scan continues.
    pub fn evaluate(
        &self,
        endpoints: &[Endpoint],
        diagnostics: &mut ScanDiagnostics,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            if self.disabled.contains(rule.id()) {
                continue;
            }
            debug!(rule = rule.id(), endpoints = endpoints.len(), "evaluating rule");

            let evaluated: Vec<Result<Option<Finding>, RuleError>> = endpoints
                .par_iter()
                .map(|endpoint| {
                    catch_unwind(AssertUnwindSafe(|| rule.evaluate(endpoint))).map_err(
                        |payload| RuleError::RulePanic {
                            rule_id: rule.id().to_string(),
                            endpoint: endpoint.identifier(),
                            message: panic_message(payload.as_ref()),
                        },
                    )
                })
                .collect();

            for outcome in evaluated {
                match outcome {
                    Ok(Some(finding)) if finding.severity.is_at_least(self.min_severity) => {
                        findings.push(finding);
                    }
                    Ok(_) => {}
                    Err(error) => {
                        warn!(error = %error, "rule evaluation fault");
                        if let RuleError::RulePanic {
                            rule_id,
                            endpoint,
                            message,
                        } = &error
                        {
                            diagnostics.record_rule_fault(rule_id, endpoint, message);
                        }
                    }
                }
            }
        }

        findings.sort_by(|a, b| {
            (Reverse(a.severity), a.rule_id.as_str())
                .cmp(&(Reverse(b.severity), b.rule_id.as_str()))
        });
        findings
    }

    /// Evaluate an analysis outcome and assemble the final scan result.
    pub fn evaluate_to_result(
        &self,
        outcome: &AnalysisOutcome,
        diagnostics: &mut ScanDiagnostics,
    ) -> ScanResult {
        let findings = self.evaluate(&outcome.endpoints, diagnostics);
        ScanResult::new(
            outcome.project_path.clone(),
            outcome.endpoints.clone(),
            findings,
            outcome.scanned_files,
            outcome.skipped_files,
            outcome.duration,
        )
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
