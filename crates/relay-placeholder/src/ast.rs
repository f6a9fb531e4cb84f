//! Parsed expression model.

use std::fmt;

/// A `prefix:name` reference to an external value source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    pub prefix: String,
    /// May itself contain `:` after the first separator.
    pub name: String,
}

impl fmt::Display for PlaceholderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.name)
    }
}

/// One call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Quoted string literal.
    Literal(String),
    /// Placeholder reference, resolved when the call runs.
    Reference(PlaceholderRef),
}

/// One `fn:name(args)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Arg>,
}

/// Head of an expression: the seed producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// `prefix:name` — seed comes from a value source.
    Placeholder(PlaceholderRef),
    /// `fn:name(...)` — no value source; the pipeline seeds with
    /// `Unresolved` so e.g. `fn:default(...)` can stand alone.
    Function(FunctionCall),
}

/// A full parsed expression: head plus pipe-separated stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub head: Head,
    pub stages: Vec<FunctionCall>,
}

impl Expression {
    /// Prefix of the head placeholder, if any.
    ///
    /// Partial template resolution keys on this to decide whether an
    /// unresolved span may stay in the output as literal text.
    pub fn head_prefix(&self) -> Option<&str> {
        match &self.head {
            Head::Placeholder(reference) => Some(&reference.prefix),
            Head::Function(_) => None,
        }
    }
}
