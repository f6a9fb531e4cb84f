//! Pipeline execution and validation.
//!
//! A [`Pipeline`] is the ordered list of `fn:` stages of one expression.
//! Execution left-folds the stages onto a seed value; validation checks
//! every stage name and argument shape against the registry without
//! executing anything (used when no value source is available).

use tracing::trace;

use crate::ast::{Arg, FunctionCall};
use crate::error::{Error, Result};
use crate::registry::{self, FunctionDescriptor};
use crate::resolution::Resolution;
use crate::resolver::ExpressionResolver;

/// Maximum number of pipe stages after the head of one expression.
pub const MAX_PIPELINE_STAGES: usize = 10;

static ABSENT: Resolution = Resolution::Unresolved;

/// A bound invocation of one registered function: the descriptor plus one
/// resolved argument per declared parameter (absent optional slots are
/// `Unresolved`).
pub struct Invocation<'a> {
    pub descriptor: &'a FunctionDescriptor,
    pub args: Vec<Resolution>,
    /// Number of arguments actually written in the expression.
    pub given: usize,
}

impl Invocation<'_> {
    /// Resolved argument for a parameter slot.
    pub fn arg(&self, idx: usize) -> &Resolution {
        self.args.get(idx).unwrap_or(&ABSENT)
    }

    /// Single value for a required parameter.
    pub fn value(&self, idx: usize) -> Result<&str> {
        self.arg(idx).first().ok_or_else(|| self.signature_error())
    }

    /// Signature error naming this function and its expected signature.
    pub fn signature_error(&self) -> Error {
        Error::invalid_signature(self.descriptor.name, self.descriptor.signature)
    }
}

/// The `fn:` stages of one expression, ready to run.
pub struct Pipeline<'a> {
    stages: &'a [FunctionCall],
}

impl<'a> Pipeline<'a> {
    pub fn new(stages: &'a [FunctionCall]) -> Self {
        Self { stages }
    }

    /// Left-fold the stages onto `seed`.
    ///
    /// Reference arguments re-enter the resolver as they are bound, so a
    /// stage like `fn:default(header:other)` performs its own lookup.
    pub fn execute(&self, seed: Resolution, resolver: &ExpressionResolver) -> Result<Resolution> {
        let mut current = seed;
        for stage in self.stages {
            let descriptor = check_shape(stage)?;
            let invocation = bind(descriptor, stage, resolver)?;
            current = (descriptor.apply)(current, &invocation)?;
            trace!(function = descriptor.name, output = ?current, "stage applied");
        }
        Ok(current)
    }

    /// Check every stage against the registry without executing.
    pub fn validate(&self) -> Result<()> {
        for stage in self.stages {
            check_shape(stage)?;
        }
        Ok(())
    }
}

/// Registry lookup plus arity check for one stage.
fn check_shape(call: &FunctionCall) -> Result<&'static FunctionDescriptor> {
    let descriptor =
        registry::get(&call.name).ok_or_else(|| Error::unknown_function(&call.name))?;
    let given = call.args.len();
    if given < descriptor.required_params() || given > descriptor.max_params() {
        return Err(Error::invalid_signature(
            descriptor.name,
            descriptor.signature,
        ));
    }
    Ok(descriptor)
}

/// Resolve the written arguments into one `Resolution` per parameter slot.
fn bind<'a>(
    descriptor: &'a FunctionDescriptor,
    call: &FunctionCall,
    resolver: &ExpressionResolver,
) -> Result<Invocation<'a>> {
    let mut args = Vec::with_capacity(descriptor.params.len());
    for (idx, param) in descriptor.params.iter().enumerate() {
        let written = call.args.get(idx);
        let resolved = match written {
            Some(Arg::Literal(literal)) => Resolution::single(literal.clone()),
            Some(Arg::Reference(reference)) => resolver.resolve_reference(reference)?,
            None => Resolution::Unresolved,
        };
        if written.is_some()
            && resolved.is_unresolved()
            && param.required
            && !param.accepts_unresolved
        {
            return Err(Error::invalid_signature(
                descriptor.name,
                descriptor.signature,
            ));
        }
        args.push(resolved);
    }
    Ok(Invocation {
        descriptor,
        args,
        given: call.args.len(),
    })
}
