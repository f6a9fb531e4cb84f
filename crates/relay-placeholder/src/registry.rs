//! Pipeline function registry.
//!
//! The function set is fixed: descriptors are `const`-constructed in the
//! `functions` modules and collected here into one static, read-only slice.
//! Lookup is by expression name (e.g. `substring-before`).

use crate::error::Result;
use crate::executor::Invocation;
use crate::functions::{basic, codec, collection, filter, string};
use crate::resolution::Resolution;

/// Implementation of one pipeline function.
pub type ApplyFn = fn(Resolution, &Invocation<'_>) -> Result<Resolution>;

/// One declared call parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub doc: &'static str,
    /// Optional parameters may only trail required ones.
    pub required: bool,
    /// Whether an unresolved reference argument is acceptable for this
    /// slot. When false, a required slot resolving to `Unresolved` is a
    /// signature error.
    pub accepts_unresolved: bool,
}

/// Descriptor for a registered pipeline function.
pub struct FunctionDescriptor {
    /// Name as written in expressions.
    pub name: &'static str,
    /// Signature string used in error messages.
    pub signature: &'static str,
    /// Documentation string.
    pub doc: &'static str,
    /// Ordered parameter signature.
    pub params: &'static [ParamSpec],
    /// The implementation.
    pub apply: ApplyFn,
}

impl FunctionDescriptor {
    /// Number of required parameters.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }

    /// Maximum number of parameters.
    pub fn max_params(&self) -> usize {
        self.params.len()
    }
}

/// All registered functions. Built once, never mutated.
pub static FUNCTIONS: &[FunctionDescriptor] = &[
    basic::DEFAULT,
    basic::DELETE,
    filter::FILTER,
    string::LOWER,
    string::UPPER,
    string::TRIM,
    string::REPLACE,
    string::SUBSTRING_BEFORE,
    string::SUBSTRING_AFTER,
    collection::SPLIT,
    collection::JOIN,
    codec::BASE64_ENCODE,
    codec::BASE64_DECODE,
    codec::URL_ENCODE,
    codec::URL_DECODE,
];

/// Look up a function by name.
pub fn get(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Check if a name is a registered function.
pub fn is_known(name: &str) -> bool {
    get(name).is_some()
}

/// All registered function names.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|f| f.name)
}
