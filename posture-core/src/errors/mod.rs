//! Error handling for Posture.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! No core error is fatal to a scan: parse failures skip the file, rule
//! faults skip the (rule, endpoint) pair, and everything non-fatal lands in
//! [`ScanDiagnostics`] so callers can see what a "clean" result omitted.

pub mod config_error;
pub mod diagnostics;
pub mod parse_error;
pub mod rule_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use diagnostics::{MalformedExpression, RuleFault, ScanDiagnostics, SkippedFile};
pub use parse_error::ParseError;
pub use rule_error::RuleError;
pub use scan_error::ScanError;
