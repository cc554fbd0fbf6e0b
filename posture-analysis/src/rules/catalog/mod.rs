//! Built-in rule catalog.
//!
//! Grouped the way findings read in a report: exposure (things reachable
//! that should not be), consistency (declarations that contradict each
//! other), privilege (role hygiene), surface (route shape).

pub mod consistency;
pub mod exposure;
pub mod privilege;
pub mod surface;

use std::sync::Arc;

use super::SecurityRule;

/// All built-in rules in catalog order (AP001..AP008).
pub fn builtin_rules() -> Vec<Arc<dyn SecurityRule>> {
    vec![
        Arc::new(exposure::PublicWithoutExplicitIntent),
        Arc::new(exposure::PermitAllOnWrite),
        Arc::new(consistency::MethodOverridesType),
        Arc::new(consistency::UnauthenticatedWrite),
        Arc::new(privilege::ExcessiveRoles),
        Arc::new(privilege::WeakRoleNaming),
        Arc::new(surface::SensitiveRouteKeyword),
        Arc::new(surface::NoSecurityAtAll),
    ]
}
