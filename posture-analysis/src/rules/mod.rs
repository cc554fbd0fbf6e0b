//! Rule system — ordered, disableable, extensible heuristics over
//! classified endpoints.
//!
//! Each rule implements the [`SecurityRule`] trait and is registered in the
//! [`RuleEngine`] in catalog order. Rules are pure and stateless; they never
//! consult other endpoints.

pub mod catalog;
mod engine;
mod traits;

pub use engine::RuleEngine;
pub use traits::SecurityRule;
