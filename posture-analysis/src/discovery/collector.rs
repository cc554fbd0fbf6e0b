//! Endpoint collector.
//!
//! A type qualifies as a controller iff it carries a controller marker
//! (REST- and view-style treated identically). Each member carrying a
//! route-mapping marker yields one endpoint with its type-level and
//! member-level intents still unmerged; the resolver ranks them later.

use posture_core::errors::ScanDiagnostics;
use posture_core::models::{AuthorizationIntent, HttpVerb, SourceLocation};

use crate::extraction::ExpressionInterpreter;
use crate::syntax::{Marker, MemberDeclaration, SyntaxUnit, TypeDeclaration};

use super::routes;

const CONTROLLER_MARKERS: [&str; 2] = ["RestController", "Controller"];

/// Generic mapping marker: path from its arguments, verbs from its `method`
/// attribute.
const GENERIC_MAPPING: &str = "RequestMapping";

/// Shorthand mapping markers with their fixed verbs.
const VERB_MAPPINGS: [(&str, HttpVerb); 5] = [
    ("GetMapping", HttpVerb::Get),
    ("PostMapping", HttpVerb::Post),
    ("PutMapping", HttpVerb::Put),
    ("DeleteMapping", HttpVerb::Delete),
    ("PatchMapping", HttpVerb::Patch),
];

/// An endpoint as discovered: route and verbs resolved, authorization still
/// split into its two declaration levels.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedEndpoint {
    pub route: String,
    pub verbs: std::collections::BTreeSet<HttpVerb>,
    pub controller: String,
    pub method: String,
    pub location: SourceLocation,
    pub type_intent: AuthorizationIntent,
    pub member_intent: AuthorizationIntent,
}

/// Walks declared types and produces unmerged endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointCollector {
    interpreter: ExpressionInterpreter,
}

impl EndpointCollector {
    pub fn new() -> Self {
        Self {
            interpreter: ExpressionInterpreter::new(),
        }
    }

    /// Collect every endpoint declared in one syntax unit, in declaration
    /// order. Malformed expression texts are recorded against the declaring
    /// node's location.
    pub fn collect(
        &self,
        unit: &SyntaxUnit,
        diagnostics: &mut ScanDiagnostics,
    ) -> Vec<CollectedEndpoint> {
        let mut endpoints = Vec::new();

        for type_decl in &unit.types {
            if !is_controller(type_decl) {
                continue;
            }

            let base_path = mapping_path(&type_decl.markers);
            let type_interpreted = self.interpreter.interpret(&type_decl.markers);
            for text in &type_interpreted.malformed_expressions {
                diagnostics.record_malformed_expression(&unit.file, 0, text);
            }

            for member in &type_decl.members {
                if !has_mapping_marker(member) {
                    continue;
                }
                endpoints.push(self.collect_member(
                    unit,
                    type_decl,
                    member,
                    base_path,
                    &type_interpreted.intent,
                    diagnostics,
                ));
            }
        }

        endpoints
    }

    fn collect_member(
        &self,
        unit: &SyntaxUnit,
        type_decl: &TypeDeclaration,
        member: &MemberDeclaration,
        base_path: &str,
        type_intent: &AuthorizationIntent,
        diagnostics: &mut ScanDiagnostics,
    ) -> CollectedEndpoint {
        let member_path = mapping_path(&member.markers);
        let route = routes::join(routes::normalize(base_path), routes::normalize(member_path));

        let member_interpreted = self.interpreter.interpret(&member.markers);
        for text in &member_interpreted.malformed_expressions {
            diagnostics.record_malformed_expression(&unit.file, member.line, text);
        }

        CollectedEndpoint {
            route,
            verbs: member_verbs(member),
            controller: type_decl.name.clone(),
            method: member.name.clone(),
            location: SourceLocation::new(unit.file.clone(), member.line),
            type_intent: type_intent.clone(),
            member_intent: member_interpreted.intent,
        }
    }
}

fn is_controller(type_decl: &TypeDeclaration) -> bool {
    type_decl
        .markers
        .iter()
        .any(|m| CONTROLLER_MARKERS.contains(&m.name.as_str()))
}

fn is_mapping_marker(marker: &Marker) -> bool {
    marker.name == GENERIC_MAPPING || VERB_MAPPINGS.iter().any(|(name, _)| *name == marker.name)
}

fn has_mapping_marker(member: &MemberDeclaration) -> bool {
    member.markers.iter().any(is_mapping_marker)
}

/// The node's path literal: first mapping marker's single literal value or
/// first array element, else its `value`/`path` attribute; empty if absent.
fn mapping_path(markers: &[Marker]) -> &str {
    markers
        .iter()
        .find(|m| is_mapping_marker(m))
        .and_then(|m| m.path_argument())
        .unwrap_or("")
}

/// Union of all verb contributions on the member's mapping markers:
/// shorthand markers contribute their fixed verb, the generic marker's
/// `method` attribute contributes zero or more tokens. Empty means `{GET}`.
fn member_verbs(member: &MemberDeclaration) -> std::collections::BTreeSet<HttpVerb> {
    let mut verbs = std::collections::BTreeSet::new();

    for marker in &member.markers {
        if let Some((_, verb)) = VERB_MAPPINGS.iter().find(|(name, _)| *name == marker.name) {
            verbs.insert(*verb);
        } else if marker.name == GENERIC_MAPPING {
            if let Some(value) = marker.attribute("method") {
                for token in value.tokens() {
                    if let Some(verb) = HttpVerb::parse_token(token) {
                        verbs.insert(verb);
                    }
                }
            }
        }
    }

    if verbs.is_empty() {
        verbs.insert(HttpVerb::Get);
    }
    verbs
}
