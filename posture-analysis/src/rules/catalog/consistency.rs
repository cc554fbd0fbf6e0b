//! Consistency rules — declarations that contradict each other across the
//! two inheritance levels.

use posture_core::models::{Endpoint, Finding, SecurityTier, Severity};

use crate::rules::traits::finding;
use crate::rules::SecurityRule;

/// AP003: a member-level permit displaced a type-level authorization
/// requirement. The resolver keeps that fact in provenance precisely so
/// this common accidental-exposure pattern stays auditable.
pub struct MethodOverridesType;

impl SecurityRule for MethodOverridesType {
    fn id(&self) -> &str {
        "AP003"
    }

    fn name(&self) -> &str {
        "Method overrides type-level authorization"
    }

    fn description(&self) -> &str {
        "Detects member-level permit markers that override a type-level \
         authorization requirement, which may indicate an unintended \
         security bypass."
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        if !(endpoint.authorization.permit_all() && endpoint.authorization.overrides_type()) {
            return None;
        }
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' has a permit marker that overrides type-level authorization",
                endpoint.route
            ),
            "Review whether this override is intentional and document the security decision",
        ))
    }
}

/// AP004: a write endpoint with no authorization at all. Disjoint from
/// AP002: this rule requires the absence of an explicit permit marker.
pub struct UnauthenticatedWrite;

impl SecurityRule for UnauthenticatedWrite {
    fn id(&self) -> &str {
        "AP004"
    }

    fn name(&self) -> &str {
        "Missing authorization on write operation"
    }

    fn description(&self) -> &str {
        "Detects write operations (POST, PUT, DELETE, PATCH) with no \
         authorization requirement, a critical exposure."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        if !endpoint.has_write_verbs() {
            return None;
        }
        if endpoint.tier != Some(SecurityTier::Public) {
            return None;
        }
        if endpoint.authorization.permit_all() {
            return None;
        }
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' allows unauthenticated write operations: {}",
                endpoint.route,
                endpoint.write_verbs_display()
            ),
            "Add an authorization requirement (roles, authorities, or authenticated-only) \
             to restrict write access",
        ))
    }
}
