//! Placeholder expression pipeline engine.
//!
//! Resolves expressions of the form `prefix:name | fn:stage(...) | ...`:
//! the head is looked up from a pluggable [`PlaceholderSource`] (or is
//! itself a `fn:` call seeded with `Unresolved`), and the result is
//! threaded through a pipe-separated chain of registered functions. Every
//! stage communicates through the three-valued [`Resolution`] algebra.
//!
//! The engine is synchronous and purely computational: no I/O, no
//! suspension points, no mutable global state. The function registry is
//! fixed at compile time.
//!
//! Whole-template substitution (scanning `{{...}}` spans, cartesian
//! expansion) lives in the `relay-template` crate on top of this one.

pub mod ast;
pub mod error;
pub mod executor;
mod functions;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod resolution;
pub mod resolver;

pub use ast::{Arg, Expression, FunctionCall, Head, PlaceholderRef};
pub use error::{Error, Result};
pub use executor::{Invocation, Pipeline, MAX_PIPELINE_STAGES};
pub use parser::parse;
pub use resolution::Resolution;
pub use resolver::{ExpressionResolver, PlaceholderSource, StaticSource};
