//! Privilege rules — role hygiene.

use posture_core::models::{Endpoint, Finding, Severity};

use crate::rules::traits::finding;
use crate::rules::SecurityRule;

const MAX_RECOMMENDED_ROLES: usize = 3;

/// AP005: more roles than anyone can reason about on one endpoint.
pub struct ExcessiveRoles;

impl SecurityRule for ExcessiveRoles {
    fn id(&self) -> &str {
        "AP005"
    }

    fn name(&self) -> &str {
        "Excessive role access"
    }

    fn description(&self) -> &str {
        "Detects endpoints granting access to more than three roles, which \
         may indicate overly permissive access or a need for refactoring."
    }

    fn default_severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        let roles = &endpoint.authorization.intent.roles;
        if roles.len() <= MAX_RECOMMENDED_ROLES {
            return None;
        }
        let listed: Vec<&str> = roles.iter().map(String::as_str).collect();
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' has {} roles: {}",
                endpoint.route,
                roles.len(),
                listed.join(", ")
            ),
            "Consolidate roles or switch to authority-based policies to simplify access control",
        ))
    }
}

/// Generic role names, matched case-insensitively against declared roles.
const WEAK_ROLE_NAMES: [&str; 10] = [
    "user",
    "admin",
    "manager",
    "guest",
    "member",
    "role_user",
    "role_admin",
    "role_manager",
    "role_guest",
    "role_member",
];

/// AP006: generic role names that say nothing about the permission granted.
pub struct WeakRoleNaming;

impl SecurityRule for WeakRoleNaming {
    fn id(&self) -> &str {
        "AP006"
    }

    fn name(&self) -> &str {
        "Weak role naming"
    }

    fn description(&self) -> &str {
        "Detects generic role names such as 'User' or 'Admin' that lack \
         specificity and invite overly broad grants."
    }

    fn default_severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        let roles = &endpoint.authorization.intent.roles;
        if roles.is_empty() {
            return None;
        }
        let weak: Vec<&str> = roles
            .iter()
            .filter(|role| WEAK_ROLE_NAMES.contains(&role.to_lowercase().as_str()))
            .map(String::as_str)
            .collect();
        if weak.is_empty() {
            return None;
        }
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' uses generic role names: {}",
                endpoint.route,
                weak.join(", ")
            ),
            "Use role names that describe the actual permission \
             (e.g. 'PRODUCTS_MANAGER' instead of 'Admin')",
        ))
    }
}
