//! Expression interpreter for authorization markers.
//!
//! Deliberately conservative: expression text is scanned for call-like
//! fragments with case-insensitive patterns, not parsed as a grammar. Text
//! that matches nothing still counts as "requires authorization" — absence
//! of a recognizable pattern never downgrades an endpoint to unprotected.

use std::sync::LazyLock;

use regex::Regex;

use posture_core::models::AuthorizationIntent;

use crate::syntax::Marker;

/// Expression-marker: free-text boolean-like authorization expression.
const EXPRESSION_MARKER: &str = "PreAuthorize";
/// Role-list markers: a single string or string array of role tokens.
const ROLE_LIST_MARKERS: [&str; 2] = ["Secured", "RolesAllowed"];
const PERMIT_MARKER: &str = "PermitAll";
const DENY_MARKER: &str = "DenyAll";

static HAS_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)hasRole\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("hasRole pattern")
});

static HAS_ANY_ROLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hasAnyRole\s*\(([^)]+)\)").expect("hasAnyRole pattern"));

static HAS_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)hasAuthority\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("hasAuthority pattern")
});

static HAS_ANY_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hasAnyAuthority\s*\(([^)]+)\)").expect("hasAnyAuthority pattern")
});

static IS_AUTHENTICATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)isAuthenticated\s*\(\s*\)").expect("isAuthenticated pattern"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("quoted-string pattern"));

/// Interpretation result: the intent plus any expression texts that matched
/// no recognized fragment. The latter feed the scan's diagnostics; they do
/// not weaken the intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpretedIntent {
    pub intent: AuthorizationIntent,
    pub malformed_expressions: Vec<String>,
}

/// Converts one node's marker list into a normalized authorization intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionInterpreter;

impl ExpressionInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Interpret every recognized marker on a node. Unknown markers are
    /// ignored. `permit_all` and `deny_all` may co-occur here; precedence is
    /// the resolver's job.
    pub fn interpret(&self, markers: &[Marker]) -> InterpretedIntent {
        let mut out = InterpretedIntent::default();

        for marker in markers {
            match marker.name.as_str() {
                EXPRESSION_MARKER => {
                    out.intent.requires_authorization = true;
                    let text = marker
                        .literal_arguments()
                        .first()
                        .copied()
                        .unwrap_or_default()
                        .to_string();
                    let matched = apply_expression(&text, &mut out.intent);
                    if !matched {
                        out.malformed_expressions.push(text.clone());
                    }
                    out.intent.expression = Some(text);
                }
                name if ROLE_LIST_MARKERS.contains(&name) => {
                    out.intent.requires_authorization = true;
                    for role in marker.literal_arguments() {
                        out.intent.roles.insert(role.trim().to_string());
                    }
                }
                PERMIT_MARKER => out.intent.permit_all = true,
                DENY_MARKER => out.intent.deny_all = true,
                _ => {}
            }
        }

        out
    }
}

/// Scan expression text for recognized fragments, filling the intent.
/// Returns whether anything matched.
fn apply_expression(text: &str, intent: &mut AuthorizationIntent) -> bool {
    let mut matched = false;

    if IS_AUTHENTICATED.is_match(text) {
        intent.authenticated_required = true;
        matched = true;
    }

    for capture in HAS_ROLE.captures_iter(text) {
        intent.roles.insert(capture[1].trim().to_string());
        matched = true;
    }

    for capture in HAS_ANY_ROLE.captures_iter(text) {
        for quoted in QUOTED.captures_iter(&capture[1]) {
            intent.roles.insert(quoted[1].trim().to_string());
            matched = true;
        }
    }

    for capture in HAS_AUTHORITY.captures_iter(text) {
        intent.authorities.insert(capture[1].trim().to_string());
        matched = true;
    }

    for capture in HAS_ANY_AUTHORITY.captures_iter(text) {
        for quoted in QUOTED.captures_iter(&capture[1]) {
            intent.authorities.insert(quoted[1].trim().to_string());
            matched = true;
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::MarkerValue;

    fn expression_marker(text: &str) -> Marker {
        Marker::with_value(EXPRESSION_MARKER, MarkerValue::Literal(text.to_string()))
    }

    #[test]
    fn has_any_role_extracts_each_role() {
        let interpreter = ExpressionInterpreter::new();
        let out = interpreter.interpret(&[expression_marker("hasAnyRole('ADMIN', 'AUDITOR')")]);
        assert!(out.intent.requires_authorization);
        assert!(out.intent.roles.contains("ADMIN"));
        assert!(out.intent.roles.contains("AUDITOR"));
        assert!(out.malformed_expressions.is_empty());
    }

    #[test]
    fn unparseable_expression_is_conservative() {
        let interpreter = ExpressionInterpreter::new();
        let out = interpreter.interpret(&[expression_marker("#oauth2.hasScope('read')")]);
        assert!(out.intent.requires_authorization);
        assert!(out.intent.roles.is_empty());
        assert!(out.intent.authorities.is_empty());
        assert_eq!(out.malformed_expressions.len(), 1);
        assert_eq!(
            out.intent.expression.as_deref(),
            Some("#oauth2.hasScope('read')")
        );
    }

    #[test]
    fn role_list_ignores_non_literals() {
        let interpreter = ExpressionInterpreter::new();
        let marker = Marker::with_value(
            "Secured",
            MarkerValue::List(vec![
                MarkerValue::Literal("ROLE_ADMIN".to_string()),
                MarkerValue::Symbol("Constants.OPERATOR".to_string()),
            ]),
        );
        let out = interpreter.interpret(&[marker]);
        assert!(out.intent.requires_authorization);
        assert_eq!(out.intent.roles.len(), 1);
        assert!(out.intent.roles.contains("ROLE_ADMIN"));
    }

    #[test]
    fn permit_and_deny_can_co_occur_at_extraction() {
        let interpreter = ExpressionInterpreter::new();
        let out = interpreter.interpret(&[Marker::new(PERMIT_MARKER), Marker::new(DENY_MARKER)]);
        assert!(out.intent.permit_all);
        assert!(out.intent.deny_all);
        assert!(!out.intent.requires_authorization);
    }
}
