//! Authorization intent extracted from declaration-site markers, and the
//! merged per-endpoint effective authorization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Normalized authorization requirement read off one node's markers.
///
/// Extraction records what the markers say without imposing precedence:
/// `permit_all` and `deny_all` may legally co-occur here. Only the resolver
/// and classifier rank the flags against each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationIntent {
    /// Set by any expression- or role-list-marker, even when no recognizable
    /// fragment was found in the expression text.
    pub requires_authorization: bool,
    pub permit_all: bool,
    pub deny_all: bool,
    pub authenticated_required: bool,
    /// Role names verbatim from the source; no `ROLE_` prefix stripping.
    pub roles: BTreeSet<String>,
    pub authorities: BTreeSet<String>,
    /// Raw expression-marker text, retained even when unparseable.
    pub expression: Option<String>,
}

impl AuthorizationIntent {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this intent carries any form of security requirement.
    /// `permit_all` deliberately does not count; `deny_all` counts via the
    /// resolver's own precedence rule rather than here.
    pub fn has_any_security(&self) -> bool {
        self.requires_authorization
            || self.authenticated_required
            || !self.roles.is_empty()
            || !self.authorities.is_empty()
    }

    /// Whether the node explicitly opted out of or into a blanket policy.
    pub fn has_explicit_policy(&self) -> bool {
        self.permit_all || self.deny_all
    }
}

/// Which declaration level the effective authorization came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Neither the member nor its type declared anything.
    None,
    /// The member's own markers decided, with nothing at the type level.
    MethodOwn,
    /// The type's markers apply unchanged; the member declared nothing.
    InheritedFromType,
    /// The member's explicit permit/deny displaced a type-level requirement.
    MethodOverridesType,
}

/// The merged, precedence-resolved authorization for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveAuthorization {
    pub intent: AuthorizationIntent,
    pub provenance: Provenance,
}

impl EffectiveAuthorization {
    pub fn none() -> Self {
        Self {
            intent: AuthorizationIntent::empty(),
            provenance: Provenance::None,
        }
    }

    pub fn has_any_security(&self) -> bool {
        self.intent.has_any_security()
    }

    pub fn permit_all(&self) -> bool {
        self.intent.permit_all
    }

    pub fn deny_all(&self) -> bool {
        self.intent.deny_all
    }

    /// True when the endpoint carries no security signal of any kind:
    /// no permit/deny, no requirement, no roles, no authorities.
    pub fn is_unmarked(&self) -> bool {
        !self.intent.has_any_security() && !self.intent.has_explicit_policy()
    }

    /// True when this authorization displaced a type-level requirement.
    pub fn overrides_type(&self) -> bool {
        self.provenance == Provenance::MethodOverridesType
    }
}

impl Default for EffectiveAuthorization {
    fn default() -> Self {
        Self::none()
    }
}
