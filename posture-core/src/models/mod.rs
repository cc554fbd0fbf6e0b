//! Data model shared by every pipeline stage.
//!
//! Endpoints are created once by discovery, mutated exactly once by
//! classification (tier assignment), and read-only from then on. Findings
//! and scan results are immutable once built.

pub mod authorization;
pub mod endpoint;
pub mod finding;
pub mod location;
pub mod result;

pub use authorization::{AuthorizationIntent, EffectiveAuthorization, Provenance};
pub use endpoint::{Endpoint, HttpVerb, SecurityTier};
pub use finding::{Finding, Severity};
pub use location::SourceLocation;
pub use result::ScanResult;
