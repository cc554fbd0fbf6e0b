//! Exposure rules — endpoints reachable more broadly than declared intent.

use posture_core::models::{Endpoint, Finding, SecurityTier, Severity};

use crate::rules::traits::finding;
use crate::rules::SecurityRule;

/// AP001: a Public endpoint with no explicit permit marker. Public-by-
/// omission is the most common unintentional exposure.
pub struct PublicWithoutExplicitIntent;

impl SecurityRule for PublicWithoutExplicitIntent {
    fn id(&self) -> &str {
        "AP001"
    }

    fn name(&self) -> &str {
        "Public without explicit intent"
    }

    fn description(&self) -> &str {
        "Detects publicly accessible endpoints that lack an explicit permit \
         marker, which may indicate unintentional exposure."
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
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
                "Endpoint '{}' is publicly accessible without an explicit permit marker",
                endpoint.route
            ),
            "Mark the endpoint with an explicit permit marker to document intentional \
             public access, or add an authorization requirement",
        ))
    }
}

/// AP002: an explicit permit marker on a write verb.
pub struct PermitAllOnWrite;

impl SecurityRule for PermitAllOnWrite {
    fn id(&self) -> &str {
        "AP002"
    }

    fn name(&self) -> &str {
        "Permit-all on write operation"
    }

    fn description(&self) -> &str {
        "Detects endpoints explicitly permitted to everyone on write verbs \
         (POST, PUT, DELETE, PATCH), which may allow unauthorized data \
         modification."
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        if !endpoint.has_write_verbs() {
            return None;
        }
        // Disjoint from AP004 by construction: AP002 requires permit_all,
        // AP004 requires its absence.
        if !endpoint.authorization.permit_all() {
            return None;
        }
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' allows public access on write operations: {}",
                endpoint.route,
                endpoint.write_verbs_display()
            ),
            "Remove the permit marker and require authorization for write operations",
        ))
    }
}
