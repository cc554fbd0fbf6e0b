//! Security classification — maps effective authorization to one tier.

use posture_core::models::{EffectiveAuthorization, Endpoint, SecurityTier};

/// Fixed decision order, first match wins:
///
/// 1. `permit_all` -> Public
/// 2. `deny_all` -> PolicyRestricted (maximally restrictive; exposure shape,
///    not literal reachability)
/// 3. roles present -> RoleRestricted
/// 4. authorities present -> PolicyRestricted
/// 5. requires authorization or authenticated -> Authenticated
/// 6. nothing -> Public
///
/// Order matters: roles are checked before authorities, and `deny_all`
/// short-circuits before role checks even when roles are also present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityClassifier;

impl SecurityClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Pure classification function. Same input, same tier, every time.
    pub fn tier_for(&self, auth: &EffectiveAuthorization) -> SecurityTier {
        let intent = &auth.intent;
        if intent.permit_all {
            SecurityTier::Public
        } else if intent.deny_all {
            SecurityTier::PolicyRestricted
        } else if !intent.roles.is_empty() {
            SecurityTier::RoleRestricted
        } else if !intent.authorities.is_empty() {
            SecurityTier::PolicyRestricted
        } else if intent.requires_authorization || intent.authenticated_required {
            SecurityTier::Authenticated
        } else {
            SecurityTier::Public
        }
    }

    /// The endpoint's single mutation: assign its tier.
    pub fn classify(&self, endpoint: Endpoint) -> Endpoint {
        let tier = self.tier_for(&endpoint.authorization);
        endpoint.with_tier(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posture_core::models::AuthorizationIntent;

    fn effective(intent: AuthorizationIntent) -> EffectiveAuthorization {
        EffectiveAuthorization {
            intent,
            provenance: posture_core::models::Provenance::MethodOwn,
        }
    }

    #[test]
    fn permit_all_wins_over_roles_and_authorities() {
        let mut intent = AuthorizationIntent::empty();
        intent.permit_all = true;
        intent.roles.insert("ADMIN".to_string());
        intent.authorities.insert("audit:read".to_string());

        let classifier = SecurityClassifier::new();
        assert_eq!(
            classifier.tier_for(&effective(intent)),
            SecurityTier::Public
        );
    }

    #[test]
    fn deny_all_short_circuits_before_roles() {
        let mut intent = AuthorizationIntent::empty();
        intent.deny_all = true;
        intent.roles.insert("ADMIN".to_string());

        let classifier = SecurityClassifier::new();
        assert_eq!(
            classifier.tier_for(&effective(intent)),
            SecurityTier::PolicyRestricted
        );
    }

    #[test]
    fn roles_rank_before_authorities() {
        let mut intent = AuthorizationIntent::empty();
        intent.roles.insert("ADMIN".to_string());
        intent.authorities.insert("audit:read".to_string());

        let classifier = SecurityClassifier::new();
        assert_eq!(
            classifier.tier_for(&effective(intent)),
            SecurityTier::RoleRestricted
        );
    }

    #[test]
    fn bare_requirement_is_authenticated() {
        let mut intent = AuthorizationIntent::empty();
        intent.requires_authorization = true;

        let classifier = SecurityClassifier::new();
        assert_eq!(
            classifier.tier_for(&effective(intent)),
            SecurityTier::Authenticated
        );
    }

    #[test]
    fn empty_intent_defaults_to_public() {
        let classifier = SecurityClassifier::new();
        assert_eq!(
            classifier.tier_for(&EffectiveAuthorization::none()),
            SecurityTier::Public
        );
    }
}
