//! Endpoint discovery — walks controller types and their mapped members,
//! producing unmerged (type-level, member-level) intent pairs per endpoint.

mod collector;
pub mod routes;

pub use collector::{CollectedEndpoint, EndpointCollector};
