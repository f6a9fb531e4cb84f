//! Whole-template placeholder substitution.
//!
//! Scans a template for `{{ prefix:name | fn:stage(...) }}` spans, resolves
//! each through the `relay-placeholder` engine, and reassembles the output
//! with cartesian expansion for multi-valued results. Used wherever the
//! platform rewrites headers, routing targets, or adapter configuration at
//! message time.
//!
//! ```
//! use relay_placeholder::{Resolution, StaticSource};
//! use relay_template::TemplateResolver;
//!
//! let session = TemplateResolver::builder()
//!     .source("header", StaticSource::new().with("device_id", "eclipse:ditto:device1234"))
//!     .build();
//! let out = session.resolve("{{ header:device_id }}").unwrap();
//! assert_eq!(out, Resolution::single("eclipse:ditto:device1234"));
//! ```

mod scanner;
mod substitute;

pub use relay_placeholder::{
    Error, ExpressionResolver, PlaceholderSource, Resolution, Result, StaticSource,
    MAX_PIPELINE_STAGES,
};

/// One session's template resolver: a prefix table plus live or validation
/// mode, built once per message context.
pub struct TemplateResolver {
    resolver: ExpressionResolver,
}

impl TemplateResolver {
    pub fn builder() -> Builder {
        Builder {
            sources: Vec::new(),
        }
    }

    /// Resolve every span of `template`; all spans must resolve.
    ///
    /// Multi-valued spans expand the result cartesian-style; a deleting
    /// span deletes the whole template. A template without spans resolves
    /// to itself.
    pub fn resolve(&self, template: &str) -> Result<Resolution> {
        substitute::substitute(template, &self.resolver, None)
    }

    /// Like [`TemplateResolver::resolve`], but spans headed by one of
    /// `allowed_unresolved_prefixes` may stay in the output as literal
    /// `{{...}}` text when they do not resolve.
    pub fn resolve_partial(
        &self,
        template: &str,
        allowed_unresolved_prefixes: &[&str],
    ) -> Result<Resolution> {
        substitute::substitute(template, &self.resolver, Some(allowed_unresolved_prefixes))
    }

    /// Check every span of `template` without executing lookups: stage
    /// names and arities against the registry, placeholder prefixes
    /// against this session's sources. Succeeds silently.
    pub fn validate(&self, template: &str) -> Result<()> {
        for span in scanner::spans(template) {
            self.resolver.validate_expression(span.expression)?;
        }
        Ok(())
    }

    /// Resolve with the session's dummy value substituted for every
    /// placeholder and return the candidate outputs. Meant for validator
    /// sessions ([`Builder::build_validator`]); a deleting span yields an
    /// empty list.
    pub fn validate_and_replace(&self, template: &str) -> Result<Vec<String>> {
        match self.resolve(template)? {
            Resolution::Resolved(values) => Ok(values),
            _ => Ok(Vec::new()),
        }
    }
}

/// Builder for [`TemplateResolver`] sessions.
pub struct Builder {
    sources: Vec<(String, Box<dyn PlaceholderSource>)>,
}

impl Builder {
    /// Register a value source for `prefix`.
    pub fn source(
        mut self,
        prefix: impl Into<String>,
        source: impl PlaceholderSource + 'static,
    ) -> Self {
        self.sources.push((prefix.into(), Box::new(source)));
        self
    }

    /// Live session: placeholders resolve through their sources.
    pub fn build(self) -> TemplateResolver {
        let mut resolver = ExpressionResolver::new();
        for (prefix, source) in self.sources {
            resolver.register(prefix, source);
        }
        TemplateResolver { resolver }
    }

    /// Validation session: every supported placeholder resolves to
    /// `dummy_value`; sources are only consulted for `supports`.
    pub fn build_validator(self, dummy_value: impl Into<String>) -> TemplateResolver {
        let mut resolver = ExpressionResolver::validator(dummy_value);
        for (prefix, source) in self.sources {
            resolver.register(prefix, source);
        }
        TemplateResolver { resolver }
    }
}
