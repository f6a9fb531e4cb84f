//! Expression resolution: head dispatch and value sources.
//!
//! An [`ExpressionResolver`] holds one session's prefix table. A session
//! either resolves live against registered [`PlaceholderSource`]s, or runs
//! in validation mode where every supported placeholder yields one fixed
//! dummy string (no source lookups are performed).

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::ast::{Arg, Expression, Head, PlaceholderRef};
use crate::error::{Error, Result};
use crate::executor::Pipeline;
use crate::parser;
use crate::resolution::Resolution;

/// External value source for one placeholder prefix.
///
/// The engine performs no I/O itself; whatever a lookup needs (a header
/// map, a clock, a parsed message) lives behind this trait.
pub trait PlaceholderSource {
    /// Whether `name` is defined for this source.
    fn supports(&self, name: &str) -> bool;

    /// Values for `name`, in order. Empty means "supported but currently
    /// absent", which seeds the pipeline with `Unresolved`.
    fn lookup(&self, name: &str) -> Vec<String>;
}

/// Map-backed source supporting any name, like a header table: a name
/// that is not present is supported but absent.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: IndexMap<String, Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value for `name` (appending to any existing ones).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Add several values for `name`.
    pub fn with_values<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

impl PlaceholderSource for StaticSource {
    fn supports(&self, _name: &str) -> bool {
        true
    }

    fn lookup(&self, name: &str) -> Vec<String> {
        self.entries.get(name).cloned().unwrap_or_default()
    }
}

enum Mode {
    Live,
    Validation { dummy: String },
}

/// One session's expression resolver: prefix table plus mode.
pub struct ExpressionResolver {
    sources: IndexMap<String, Box<dyn PlaceholderSource>>,
    mode: Mode,
}

impl Default for ExpressionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionResolver {
    /// Live session with no sources registered yet.
    pub fn new() -> Self {
        Self {
            sources: IndexMap::new(),
            mode: Mode::Live,
        }
    }

    /// Validation session: every supported placeholder resolves to `dummy`.
    pub fn validator(dummy: impl Into<String>) -> Self {
        Self {
            sources: IndexMap::new(),
            mode: Mode::Validation {
                dummy: dummy.into(),
            },
        }
    }

    /// Register a source for `prefix`.
    pub fn register(&mut self, prefix: impl Into<String>, source: Box<dyn PlaceholderSource>) {
        self.sources.insert(prefix.into(), source);
    }

    /// Builder-style [`ExpressionResolver::register`].
    pub fn with_source(
        mut self,
        prefix: impl Into<String>,
        source: impl PlaceholderSource + 'static,
    ) -> Self {
        self.register(prefix, Box::new(source));
        self
    }

    /// Parse and resolve a full expression string.
    pub fn resolve(&self, src: &str) -> Result<Resolution> {
        let expression = parser::parse(src)?;
        self.resolve_expression(&expression)
    }

    /// Resolve an already parsed expression.
    ///
    /// A `fn:` head runs as stage zero over an `Unresolved` seed, so a
    /// pipeline may start with e.g. `fn:default(...)` and no placeholder
    /// at all.
    pub fn resolve_expression(&self, expression: &Expression) -> Result<Resolution> {
        let seed = match &expression.head {
            Head::Function(call) => {
                Pipeline::new(std::slice::from_ref(call)).execute(Resolution::Unresolved, self)?
            }
            Head::Placeholder(reference) => self.resolve_reference(reference)?,
        };
        trace!(seed = ?seed, stages = expression.stages.len(), "pipeline seeded");
        Pipeline::new(&expression.stages).execute(seed, self)
    }

    /// Resolve one `prefix:name` reference (an expression head or a
    /// function argument).
    ///
    /// An unknown prefix or an unsupported name raises
    /// [`Error::UnresolvedPlaceholder`]; a supported name with no current
    /// value yields `Unresolved`.
    pub fn resolve_reference(&self, reference: &PlaceholderRef) -> Result<Resolution> {
        let source = self
            .sources
            .get(reference.prefix.as_str())
            .ok_or_else(|| Error::unresolved(reference.to_string()))?;
        if !source.supports(&reference.name) {
            return Err(Error::unresolved(reference.to_string()));
        }
        match &self.mode {
            Mode::Validation { dummy } => Ok(Resolution::single(dummy.clone())),
            Mode::Live => {
                let values = source.lookup(&reference.name);
                if values.is_empty() {
                    debug!(placeholder = %reference, "supported placeholder has no value");
                }
                Ok(Resolution::resolved(values))
            }
        }
    }

    /// Parse an expression and check it can run: stage names and arities
    /// against the registry, reference prefixes against the session's
    /// sources. Nothing executes and no lookups are performed.
    pub fn validate_expression(&self, src: &str) -> Result<()> {
        let expression = parser::parse(src)?;
        match &expression.head {
            Head::Function(call) => {
                Pipeline::new(std::slice::from_ref(call)).validate()?;
                self.check_references(call)?;
            }
            Head::Placeholder(reference) => self.check_reference(reference)?,
        }
        Pipeline::new(&expression.stages).validate()?;
        for stage in &expression.stages {
            self.check_references(stage)?;
        }
        Ok(())
    }

    fn check_references(&self, call: &crate::ast::FunctionCall) -> Result<()> {
        for arg in &call.args {
            if let Arg::Reference(reference) = arg {
                self.check_reference(reference)?;
            }
        }
        Ok(())
    }

    fn check_reference(&self, reference: &PlaceholderRef) -> Result<()> {
        let source = self
            .sources
            .get(reference.prefix.as_str())
            .ok_or_else(|| Error::unresolved(reference.to_string()))?;
        if !source.supports(&reference.name) {
            return Err(Error::unresolved(reference.to_string()));
        }
        Ok(())
    }
}
