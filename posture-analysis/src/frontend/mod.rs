//! Built-in front-end: deterministic file discovery plus a line-oriented
//! annotation parser that fills the [`crate::syntax`] contract.

mod java;
mod walker;

pub use java::JavaAnnotationProvider;
pub use walker::SourceWalker;
