//! Discovered endpoints, HTTP verbs, and security tiers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::authorization::EffectiveAuthorization;
use super::location::SourceLocation;

/// HTTP verbs recognized on route-mapping markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpVerb {
    /// Whether this verb modifies data.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Delete | Self::Patch)
    }

    pub fn is_read(self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Parse a verb token case-insensitively. Accepts the trailing segment of
    /// qualified constants, so both `GET` and `RequestMethod.GET` resolve.
    pub fn parse_token(token: &str) -> Option<Self> {
        let tail = token.rsplit('.').next().unwrap_or(token).trim();
        match tail.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse security tier of a classified endpoint.
///
/// The declaration order mirrors the classifier's decision priority, not a
/// strict security lattice: `DenyAll` lands in `PolicyRestricted` before
/// roles are even looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityTier {
    Public,
    Authenticated,
    RoleRestricted,
    PolicyRestricted,
}

impl SecurityTier {
    pub const ALL: [SecurityTier; 4] = [
        Self::Public,
        Self::Authenticated,
        Self::RoleRestricted,
        Self::PolicyRestricted,
    ];
}

/// One discovered API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Route template: leading slash, no trailing slash, `"/"` for root.
    pub route: String,
    /// Never empty; discovery defaults to `{GET}`.
    pub verbs: BTreeSet<HttpVerb>,
    pub controller: String,
    pub method: String,
    pub location: SourceLocation,
    pub authorization: EffectiveAuthorization,
    /// `None` until the classifier runs. Never defaulted to `Public`.
    pub tier: Option<SecurityTier>,
}

impl Endpoint {
    pub fn has_write_verbs(&self) -> bool {
        self.verbs.iter().any(|v| v.is_write())
    }

    pub fn has_read_verbs(&self) -> bool {
        self.verbs.iter().any(|v| v.is_read())
    }

    pub fn is_public(&self) -> bool {
        self.tier == Some(SecurityTier::Public)
    }

    /// The write subset of this endpoint's verbs, comma-separated.
    pub fn write_verbs_display(&self) -> String {
        let verbs: Vec<&str> = self
            .verbs
            .iter()
            .filter(|v| v.is_write())
            .map(|v| v.as_str())
            .collect();
        verbs.join(", ")
    }

    /// `"GET,POST /api/items"`-style identifier.
    pub fn identifier(&self) -> String {
        let verbs: Vec<&str> = self.verbs.iter().map(|v| v.as_str()).collect();
        format!("{} {}", verbs.join(","), self.route)
    }

    /// The classifier's single permitted mutation.
    pub fn with_tier(mut self, tier: SecurityTier) -> Self {
        self.tier = Some(tier);
        self
    }
}
