//! Marker interpretation — turns one node's declaration-site markers into a
//! normalized [`posture_core::models::AuthorizationIntent`].

mod interpreter;

pub use interpreter::{ExpressionInterpreter, InterpretedIntent};
