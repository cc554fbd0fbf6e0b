//! The rule capability interface.

use posture_core::models::{Endpoint, Finding, Severity};

/// A pure, stateless heuristic over one classified endpoint.
///
/// The open set of rule implementations maps to this closed interface;
/// the engine holds them as a homogeneous ordered collection keyed by id.
/// Built-in ids are `AP001`..`AP008`; externally registered rules use a
/// distinct namespace (`EXT...`).
pub trait SecurityRule: Send + Sync {
    /// Unique identifier, stable across runs.
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn default_severity(&self) -> Severity;

    /// Evaluate one endpoint. `None` means the rule does not apply.
    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding>;
}

/// Shared constructor for findings so every rule reports identically.
pub(crate) fn finding(
    rule: &dyn SecurityRule,
    endpoint: &Endpoint,
    message: String,
    recommendation: &str,
) -> Finding {
    Finding {
        rule_id: rule.id().to_string(),
        rule_name: rule.name().to_string(),
        severity: rule.default_severity(),
        message,
        endpoint: endpoint.clone(),
        recommendation: recommendation.to_string(),
    }
}
