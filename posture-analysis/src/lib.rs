//! Analysis engine for the Posture API security scanner.
//!
//! The pipeline is a single chain of endpoint-local transforms:
//!
//! syntax tree -> [`discovery::EndpointCollector`] (uses
//! [`extraction::ExpressionInterpreter`]) -> unmerged endpoints ->
//! [`resolve::AuthorizationResolver`] -> [`classify::SecurityClassifier`] ->
//! [`rules::RuleEngine`] -> `ScanResult`.
//!
//! Each stage depends only on the previous stage's output. Nothing in the
//! core blocks, and endpoints are immutable after classification, so rule
//! evaluation parallelizes without locks.

pub mod analyzer;
pub mod classify;
pub mod discovery;
pub mod extensions;
pub mod extraction;
pub mod frontend;
pub mod resolve;
pub mod rules;
pub mod syntax;

pub use analyzer::{AnalysisOutcome, ProjectAnalyzer};
pub use classify::SecurityClassifier;
pub use discovery::EndpointCollector;
pub use extensions::{Extension, ExtensionRegistry};
pub use extraction::ExpressionInterpreter;
pub use frontend::{JavaAnnotationProvider, SourceWalker};
pub use resolve::AuthorizationResolver;
pub use rules::{RuleEngine, SecurityRule};
