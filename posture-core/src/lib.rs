//! Core types, errors, config, and tracing for the Posture scanner.
//!
//! `posture-core` carries no analysis logic. It defines the data model the
//! pipeline stages exchange (endpoints, authorization, findings, scan
//! results), the per-subsystem error enums, the TOML configuration, and
//! tracing initialization. The pipeline itself lives in `posture-analysis`.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;

pub use config::PostureConfig;
pub use errors::{ConfigError, ParseError, RuleError, ScanDiagnostics, ScanError};
pub use models::{
    AuthorizationIntent, EffectiveAuthorization, Endpoint, Finding, HttpVerb, Provenance,
    ScanResult, SecurityTier, Severity, SourceLocation,
};
