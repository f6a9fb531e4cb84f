//! Pipeline function implementations.
//!
//! One module per category. Descriptors are `const`-constructed here and
//! collected into [`crate::registry::FUNCTIONS`]; nothing registers at
//! runtime.

pub(crate) mod basic;
pub(crate) mod codec;
pub(crate) mod collection;
pub(crate) mod filter;
pub(crate) mod string;
