//! Project analyzer — runs the whole pipeline over one source tree.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use posture_core::config::PostureConfig;
use posture_core::errors::{ScanDiagnostics, ScanError};
use posture_core::models::{Endpoint, ScanResult};

use crate::classify::SecurityClassifier;
use crate::discovery::EndpointCollector;
use crate::frontend::{JavaAnnotationProvider, SourceWalker};
use crate::resolve::AuthorizationResolver;
use crate::rules::RuleEngine;
use crate::syntax::{SyntaxProvider, SyntaxUnit};

/// Classified endpoints plus scan metadata, before rule evaluation.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub project_path: String,
    pub endpoints: Vec<Endpoint>,
    pub scanned_files: usize,
    pub skipped_files: usize,
    pub duration: Duration,
}

/// Drives walk, parse, collect, resolve, and classify for a project tree.
///
/// Unreadable and unparseable files are recorded as diagnostics and skipped;
/// a scan only fails outright when the walk itself does.
pub struct ProjectAnalyzer {
    provider: Box<dyn SyntaxProvider>,
    collector: EndpointCollector,
    resolver: AuthorizationResolver,
    classifier: SecurityClassifier,
    config: PostureConfig,
}

impl ProjectAnalyzer {
    pub fn new() -> Self {
        Self::with_config(PostureConfig::default())
    }

    pub fn with_config(config: PostureConfig) -> Self {
        Self::with_provider(Box::new(JavaAnnotationProvider::new()), config)
    }

    /// Analyzer with a caller-supplied front-end.
    pub fn with_provider(provider: Box<dyn SyntaxProvider>, config: PostureConfig) -> Self {
        Self {
            provider,
            collector: EndpointCollector::new(),
            resolver: AuthorizationResolver::new(),
            classifier: SecurityClassifier::new(),
            config,
        }
    }

    /// Walk the tree and produce classified endpoints in file-then-declaration
    /// order.
    pub fn analyze(
        &self,
        root: &Path,
        diagnostics: &mut ScanDiagnostics,
    ) -> Result<AnalysisOutcome, ScanError> {
        let started = Instant::now();
        let files = SourceWalker::from_config(&self.config).walk(root)?;
        info!(root = %root.display(), files = files.len(), "analysis started");

        let mut endpoints = Vec::new();
        let mut scanned = 0usize;
        let mut skipped = 0usize;

        for path in &files {
            let path_text = path.display().to_string();
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(file = %path_text, error = %e, "unreadable file skipped");
                    diagnostics.record_skipped_file(&path_text, &e.to_string());
                    skipped += 1;
                    continue;
                }
            };
            match self.provider.parse(&content, &path_text) {
                Ok(unit) => {
                    scanned += 1;
                    endpoints.extend(self.analyze_unit(&unit, diagnostics));
                }
                Err(e) => {
                    warn!(file = %path_text, error = %e, "unparseable file skipped");
                    diagnostics.record_skipped_file(&path_text, &e.to_string());
                    skipped += 1;
                }
            }
        }

        debug!(
            endpoints = endpoints.len(),
            scanned, skipped, "analysis complete"
        );
        Ok(AnalysisOutcome {
            project_path: root.display().to_string(),
            endpoints,
            scanned_files: scanned,
            skipped_files: skipped,
            duration: started.elapsed(),
        })
    }

    /// Per-unit pipeline: collect, resolve, classify.
    pub fn analyze_unit(
        &self,
        unit: &SyntaxUnit,
        diagnostics: &mut ScanDiagnostics,
    ) -> Vec<Endpoint> {
        self.collector
            .collect(unit, diagnostics)
            .into_iter()
            .map(|collected| self.resolver.resolve_endpoint(collected))
            .map(|endpoint| self.classifier.classify(endpoint))
            .collect()
    }

    /// Full scan: analyze the tree, then evaluate the given rule engine.
    pub fn scan(
        &self,
        root: &Path,
        engine: &RuleEngine,
        diagnostics: &mut ScanDiagnostics,
    ) -> Result<ScanResult, ScanError> {
        let outcome = self.analyze(root, diagnostics)?;
        Ok(engine.evaluate_to_result(&outcome, diagnostics))
    }
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
