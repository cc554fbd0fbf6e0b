//! Filesystem scan tests: walking, skip lists, excludes, and end-to-end
//! scan assembly against a real temporary tree.

use std::fs;
use std::path::Path;

use posture_analysis::{ProjectAnalyzer, RuleEngine, SourceWalker};
use posture_core::config::PostureConfig;
use posture_core::errors::{ScanDiagnostics, ScanError};
use posture_core::models::SecurityTier;

const ITEM_CONTROLLER: &str = r#"
@RestController
@RequestMapping("/api/items")
public class ItemController {
    @GetMapping("/{id}")
    public Item find(Long id) { return null; }

    @PostMapping
    public Item create(Item item) { return null; }
}
"#;

const ADMIN_CONTROLLER: &str = r#"
@RestController
@RequestMapping("/admin")
@PreAuthorize("hasRole('ADMIN')")
public class AdminController {
    @GetMapping("/dashboard")
    public String dashboard() { return ""; }
}
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// The walker returns only main-tree source files, sorted, with build
/// output and test trees skipped by default.
#[test]
fn walker_skips_build_output_and_test_trees() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main/java/ItemController.java", ITEM_CONTROLLER);
    write(root, "src/main/java/AdminController.java", ADMIN_CONTROLLER);
    write(root, "src/test/java/ItemControllerTest.java", ITEM_CONTROLLER);
    write(root, "target/generated/Stub.java", ITEM_CONTROLLER);
    write(root, "src/main/java/notes.txt", "not source");

    let files = SourceWalker::new().walk(root).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["AdminController.java", "ItemController.java"]
    );
}

/// Test trees are walked when the configuration opts in.
#[test]
fn include_tests_opts_test_trees_in() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main/java/ItemController.java", ITEM_CONTROLLER);
    write(root, "src/test/java/ItemControllerTest.java", ITEM_CONTROLLER);

    let config = PostureConfig {
        include_tests: Some(true),
        ..PostureConfig::default()
    };
    let files = SourceWalker::from_config(&config).walk(root).unwrap();
    assert_eq!(files.len(), 2);
}

/// Configured exclude globs drop matching paths from the walk.
#[test]
fn exclude_globs_drop_matching_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main/java/ItemController.java", ITEM_CONTROLLER);
    write(root, "src/main/java/generated/Stub.java", ITEM_CONTROLLER);

    let config = PostureConfig {
        exclude: vec!["**/generated/**".to_string()],
        ..PostureConfig::default()
    };
    let files = SourceWalker::from_config(&config).walk(root).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("src/main/java/ItemController.java"));
}

/// A malformed exclude pattern fails the walk up front.
#[test]
fn invalid_exclude_pattern_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = PostureConfig {
        exclude: vec!["[".to_string()],
        ..PostureConfig::default()
    };
    let err = SourceWalker::from_config(&config).walk(dir.path());
    assert!(matches!(err, Err(ScanError::InvalidExclude { .. })));
}

/// A missing project root is a fatal scan error.
#[test]
fn missing_root_is_fatal() {
    let err = SourceWalker::new().walk(Path::new("/nonexistent/project/root"));
    assert!(matches!(err, Err(ScanError::MissingRoot(_))));
}

/// Full scan over a real tree: endpoints discovered and classified,
/// findings ranked, unreadable files recorded without failing the scan.
#[test]
fn full_scan_assembles_result() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main/java/ItemController.java", ITEM_CONTROLLER);
    write(root, "src/main/java/AdminController.java", ADMIN_CONTROLLER);
    write(root, "src/main/java/Garbage.java", "bin\0ary");

    let analyzer = ProjectAnalyzer::new();
    let engine = RuleEngine::new();
    let mut diagnostics = ScanDiagnostics::new();
    let result = analyzer.scan(root, &engine, &mut diagnostics).unwrap();

    assert_eq!(result.total_endpoints(), 3);
    assert_eq!(result.scanned_files, 2);
    assert_eq!(result.skipped_files, 1);
    assert_eq!(diagnostics.skipped_files.len(), 1);

    // AdminController sorts before ItemController in the walk.
    assert_eq!(result.endpoints[0].route, "/admin/dashboard");
    assert_eq!(
        result.endpoints[0].tier,
        Some(SecurityTier::RoleRestricted)
    );
    assert_eq!(result.endpoints[1].route, "/api/items/{id}");
    assert_eq!(result.endpoints[2].route, "/api/items");

    // The unmarked write endpoint dominates the ranking.
    assert!(result.has_findings(posture_core::models::Severity::Critical));
    assert_eq!(result.findings[0].rule_id, "AP004");
    assert_eq!(result.findings[0].endpoint.route, "/api/items");

    let tiers = result.endpoints_by_tier();
    assert_eq!(tiers[&SecurityTier::Public].len(), 2);
    assert_eq!(tiers[&SecurityTier::RoleRestricted].len(), 1);
}
