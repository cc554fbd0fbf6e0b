//! Authorization resolution — merges the (type-level, member-level) intent
//! pair into one effective authorization with provenance.

use posture_core::models::{
    AuthorizationIntent, EffectiveAuthorization, Endpoint, Provenance,
};

use crate::discovery::CollectedEndpoint;

/// Two-level precedence merge. First match wins:
///
/// 1. Member permit/deny beats everything, including an inherited type-level
///    requirement. Provenance records whether a requirement was displaced so
///    the override stays auditable (rule AP003 depends on it).
/// 2. A member with its own security requirement overrides the type.
/// 3. A type-level requirement is inherited unchanged.
/// 4. Nothing anywhere: empty intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationResolver;

impl AuthorizationResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        type_intent: &AuthorizationIntent,
        member_intent: &AuthorizationIntent,
    ) -> EffectiveAuthorization {
        if member_intent.has_explicit_policy() {
            let provenance = if type_intent.has_any_security() {
                Provenance::MethodOverridesType
            } else {
                Provenance::MethodOwn
            };
            return EffectiveAuthorization {
                intent: member_intent.clone(),
                provenance,
            };
        }

        if member_intent.has_any_security() {
            return EffectiveAuthorization {
                intent: member_intent.clone(),
                provenance: Provenance::MethodOwn,
            };
        }

        if type_intent.has_any_security() {
            return EffectiveAuthorization {
                intent: type_intent.clone(),
                provenance: Provenance::InheritedFromType,
            };
        }

        EffectiveAuthorization::none()
    }

    /// Turn a collected endpoint into an (unclassified) endpoint with its
    /// effective authorization resolved.
    pub fn resolve_endpoint(&self, collected: CollectedEndpoint) -> Endpoint {
        let authorization = self.resolve(&collected.type_intent, &collected.member_intent);
        Endpoint {
            route: collected.route,
            verbs: collected.verbs,
            controller: collected.controller,
            method: collected.method,
            location: collected.location,
            authorization,
            tier: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_intent(role: &str) -> AuthorizationIntent {
        let mut intent = AuthorizationIntent::empty();
        intent.requires_authorization = true;
        intent.roles.insert(role.to_string());
        intent
    }

    #[test]
    fn member_permit_overrides_type_requirement() {
        let resolver = AuthorizationResolver::new();
        let mut member = AuthorizationIntent::empty();
        member.permit_all = true;

        let effective = resolver.resolve(&role_intent("ADMIN"), &member);
        assert!(effective.permit_all());
        assert_eq!(effective.provenance, Provenance::MethodOverridesType);
    }

    #[test]
    fn member_permit_without_type_security_is_own() {
        let resolver = AuthorizationResolver::new();
        let mut member = AuthorizationIntent::empty();
        member.permit_all = true;

        let effective = resolver.resolve(&AuthorizationIntent::empty(), &member);
        assert_eq!(effective.provenance, Provenance::MethodOwn);
    }

    #[test]
    fn unmarked_member_inherits_type_intent() {
        let resolver = AuthorizationResolver::new();
        let effective = resolver.resolve(&role_intent("ADMIN"), &AuthorizationIntent::empty());
        assert!(effective.intent.roles.contains("ADMIN"));
        assert_eq!(effective.provenance, Provenance::InheritedFromType);
    }

    #[test]
    fn nothing_anywhere_resolves_to_none() {
        let resolver = AuthorizationResolver::new();
        let effective =
            resolver.resolve(&AuthorizationIntent::empty(), &AuthorizationIntent::empty());
        assert!(effective.is_unmarked());
        assert_eq!(effective.provenance, Provenance::None);
    }
}
