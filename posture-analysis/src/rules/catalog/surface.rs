//! Surface rules — route shape and missing declarations.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

use posture_core::models::{Endpoint, Finding, SecurityTier, Severity};

use crate::rules::traits::finding;
use crate::rules::SecurityRule;

/// Keywords that suggest privileged functionality, in report priority
/// order: when several occur in one route, the first in this list wins.
const SENSITIVE_KEYWORDS: [&str; 21] = [
    "admin",
    "debug",
    "export",
    "import",
    "backup",
    "restore",
    "config",
    "configuration",
    "settings",
    "internal",
    "private",
    "secret",
    "token",
    "key",
    "password",
    "credential",
    "management",
    "actuator",
    "metrics",
    "health",
    "info",
];

static KEYWORD_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(SENSITIVE_KEYWORDS)
        .expect("sensitive keyword matcher")
});

/// AP007: a sensitive keyword in a public route.
pub struct SensitiveRouteKeyword;

impl SecurityRule for SensitiveRouteKeyword {
    fn id(&self) -> &str {
        "AP007"
    }

    fn name(&self) -> &str {
        "Sensitive route keywords"
    }

    fn description(&self) -> &str {
        "Detects public routes containing keywords like 'admin', 'debug', or \
         'export' that usually mark privileged functionality."
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        if endpoint.tier != Some(SecurityTier::Public) {
            return None;
        }
        // First match by keyword-list order, not by position in the route.
        // Overlapping iteration so a keyword inside another match still
        // participates in the ranking.
        let keyword = KEYWORD_MATCHER
            .find_overlapping_iter(&endpoint.route)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|idx| SENSITIVE_KEYWORDS[idx])?;
        Some(finding(
            self,
            endpoint,
            format!(
                "Public endpoint '{}' contains sensitive keyword '{}'",
                endpoint.route, keyword
            ),
            "Require authorization on this endpoint or move it off the public surface",
        ))
    }
}

/// AP008: no security declaration of any kind, anywhere.
pub struct NoSecurityAtAll;

impl SecurityRule for NoSecurityAtAll {
    fn id(&self) -> &str {
        "AP008"
    }

    fn name(&self) -> &str {
        "Controller without security declaration"
    }

    fn description(&self) -> &str {
        "Detects endpoints whose effective authorization carries no security \
         signal at all: no permit/deny, no requirement, no roles, no \
         authorities."
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, endpoint: &Endpoint) -> Option<Finding> {
        if !endpoint.authorization.is_unmarked() {
            return None;
        }
        Some(finding(
            self,
            endpoint,
            format!(
                "Endpoint '{}' has no security declarations",
                endpoint.route
            ),
            "Declare the intended access explicitly: an authorization requirement, \
             role list, or a deliberate permit marker",
        ))
    }
}
