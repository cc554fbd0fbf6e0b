//! End-to-end pipeline tests: source text through parse, collect, resolve,
//! and classify.

use posture_analysis::{JavaAnnotationProvider, ProjectAnalyzer, RuleEngine};
use posture_analysis::syntax::SyntaxProvider;
use posture_core::errors::ScanDiagnostics;
use posture_core::models::{Endpoint, HttpVerb, Provenance, SecurityTier};

fn analyze(source: &str) -> (Vec<Endpoint>, ScanDiagnostics) {
    let unit = JavaAnnotationProvider::new()
        .parse(source, "Controller.java")
        .unwrap();
    let mut diagnostics = ScanDiagnostics::new();
    let endpoints = ProjectAnalyzer::new().analyze_unit(&unit, &mut diagnostics);
    (endpoints, diagnostics)
}

/// Type-level base path composes with member paths; shorthand markers fix
/// the verb set.
#[test]
fn routes_compose_and_shorthand_verbs_apply() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        @RequestMapping("/api/items")
        public class ItemController {
            @GetMapping("/{id}")
            public Item find(Long id) { return null; }

            @PostMapping
            public Item create(Item item) { return null; }
        }
        "#,
    );
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0].route, "/api/items/{id}");
    assert!(endpoints[0].verbs.contains(&HttpVerb::Get));
    assert_eq!(endpoints[1].route, "/api/items");
    assert!(endpoints[1].verbs.contains(&HttpVerb::Post));
}

/// The generic mapping marker reads verbs from its `method` attribute,
/// accepting qualified constants, and defaults to GET when absent.
#[test]
fn generic_mapping_verbs_come_from_method_attribute() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        public class BatchController {
            @RequestMapping(value = "/batch", method = {RequestMethod.POST, RequestMethod.PUT})
            public void run() {}

            @RequestMapping("/status")
            public String status() { return "ok"; }
        }
        "#,
    );
    assert_eq!(endpoints.len(), 2);
    let batch: Vec<HttpVerb> = endpoints[0].verbs.iter().copied().collect();
    assert_eq!(batch, vec![HttpVerb::Post, HttpVerb::Put]);
    let status: Vec<HttpVerb> = endpoints[1].verbs.iter().copied().collect();
    assert_eq!(status, vec![HttpVerb::Get]);
}

/// Types without a controller marker contribute nothing, and members
/// without a mapping marker are not endpoints.
#[test]
fn non_controllers_and_unmapped_members_are_ignored() {
    let (endpoints, _) = analyze(
        r#"
        public class ItemService {
            @GetMapping("/not-an-endpoint")
            public void helper() {}
        }

        @RestController
        public class ItemController {
            public void internalHelper() {}
        }
        "#,
    );
    assert!(endpoints.is_empty());
}

/// Empty paths at both levels resolve to the root route.
#[test]
fn empty_paths_resolve_to_root() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        public class RootController {
            @GetMapping
            public String index() { return ""; }
        }
        "#,
    );
    assert_eq!(endpoints[0].route, "/");
}

/// A type-level role list is inherited by unmarked members.
#[test]
fn type_level_roles_are_inherited() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        @RequestMapping("/admin")
        @Secured("ADMIN")
        public class AdminController {
            @GetMapping("/dashboard")
            public String dashboard() { return ""; }
        }
        "#,
    );
    let endpoint = &endpoints[0];
    assert_eq!(endpoint.tier, Some(SecurityTier::RoleRestricted));
    assert_eq!(endpoint.authorization.provenance, Provenance::InheritedFromType);
    assert!(endpoint.authorization.intent.roles.contains("ADMIN"));
}

/// Expression markers populate roles, authorities, and the authenticated
/// flag; role names are kept verbatim.
#[test]
fn expression_fragments_are_extracted() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        public class AuditController {
            @PreAuthorize("hasAnyRole('ADMIN', 'AUDITOR') and hasAuthority('audit:read')")
            @GetMapping("/audit")
            public String audit() { return ""; }

            @PreAuthorize("isAuthenticated()")
            @GetMapping("/me")
            public String me() { return ""; }
        }
        "#,
    );
    let audit = &endpoints[0];
    assert_eq!(audit.tier, Some(SecurityTier::RoleRestricted));
    assert!(audit.authorization.intent.roles.contains("ADMIN"));
    assert!(audit.authorization.intent.roles.contains("AUDITOR"));
    assert!(audit.authorization.intent.authorities.contains("audit:read"));
    assert_eq!(audit.authorization.provenance, Provenance::MethodOwn);

    let me = &endpoints[1];
    assert_eq!(me.tier, Some(SecurityTier::Authenticated));
    assert!(me.authorization.intent.authenticated_required);
}

/// A member-level permit marker displaces a type-level requirement and the
/// provenance records the override.
#[test]
fn member_permit_overrides_type_requirement() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        @PreAuthorize("hasRole('ADMIN')")
        public class MixedController {
            @PermitAll
            @GetMapping("/open")
            public String open() { return ""; }
        }
        "#,
    );
    let endpoint = &endpoints[0];
    assert_eq!(endpoint.tier, Some(SecurityTier::Public));
    assert!(endpoint.authorization.permit_all());
    assert!(endpoint.authorization.overrides_type());
}

/// A deny marker classifies as the most restrictive tier.
#[test]
fn deny_all_is_policy_restricted() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        public class FrozenController {
            @DenyAll
            @GetMapping("/frozen")
            public String frozen() { return ""; }
        }
        "#,
    );
    assert_eq!(endpoints[0].tier, Some(SecurityTier::PolicyRestricted));
}

/// An expression with no recognizable fragment still requires authorization
/// and leaves a malformed-expression diagnostic with the member's line.
#[test]
fn unrecognized_expressions_stay_conservative() {
    let (endpoints, diagnostics) = analyze(
        r#"
        @RestController
        public class CustomController {
            @PreAuthorize("@customBean.check(#id)")
            @GetMapping("/custom")
            public String custom() { return ""; }
        }
        "#,
    );
    let endpoint = &endpoints[0];
    assert_eq!(endpoint.tier, Some(SecurityTier::Authenticated));
    assert!(endpoint.authorization.intent.requires_authorization);

    assert_eq!(diagnostics.malformed_expressions.len(), 1);
    let record = &diagnostics.malformed_expressions[0];
    assert_eq!(record.file, "Controller.java");
    assert_eq!(record.line, endpoint.location.line);
    assert!(record.expression.contains("customBean"));
}

/// A type-level requirement with one unmarked member and one permit-marked
/// member: the inheriting endpoint is clean, the permitted one fires only
/// the override rule.
#[test]
fn mixed_controller_end_to_end() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        @RequestMapping("/api")
        @PreAuthorize("hasRole('ADMIN')")
        public class MixedController {
            @GetMapping("/inherited")
            public String inherited() { return ""; }

            @PermitAll
            @GetMapping("/opened")
            public String opened() { return ""; }
        }
        "#,
    );
    assert_eq!(endpoints.len(), 2);

    let inherited = &endpoints[0];
    assert_eq!(inherited.tier, Some(SecurityTier::RoleRestricted));
    assert!(inherited.authorization.intent.roles.contains("ADMIN"));
    assert_eq!(
        inherited.authorization.provenance,
        Provenance::InheritedFromType
    );

    let opened = &endpoints[1];
    assert_eq!(opened.tier, Some(SecurityTier::Public));

    let findings = RuleEngine::new().evaluate(&endpoints, &mut ScanDiagnostics::new());
    let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert!(ids.contains(&"AP003"));
    assert!(!ids.contains(&"AP001"));
    assert!(!ids.contains(&"AP008"));
    let override_finding = findings.iter().find(|f| f.rule_id == "AP003").unwrap();
    assert_eq!(override_finding.endpoint.route, "/api/opened");
}

/// Every classified endpoint carries a tier; the pipeline never leaves one
/// unclassified.
#[test]
fn all_pipeline_endpoints_are_classified() {
    let (endpoints, _) = analyze(
        r#"
        @RestController
        @RequestMapping("/api")
        public class WideController {
            @GetMapping("/a")
            public void a() {}
            @PermitAll
            @PostMapping("/b")
            public void b() {}
            @Secured({"A", "B"})
            @DeleteMapping("/c")
            public void c() {}
        }
        "#,
    );
    assert_eq!(endpoints.len(), 3);
    assert!(endpoints.iter().all(|e| e.tier.is_some()));
}
