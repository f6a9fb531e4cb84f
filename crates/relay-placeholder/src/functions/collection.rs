//! Multi-value functions: `split` and `join`.

use crate::error::Result;
use crate::executor::Invocation;
use crate::registry::{FunctionDescriptor, ParamSpec};
use crate::resolution::Resolution;

const SEPARATOR: ParamSpec = ParamSpec {
    name: "separator",
    doc: "Literal separator.",
    required: true,
    accepts_unresolved: false,
};

/// `split(separator)`: one value becomes N. A value without the separator
/// passes through unchanged (not an error), and an empty separator is
/// treated the same way.
pub(crate) const SPLIT: FunctionDescriptor = FunctionDescriptor {
    name: "split",
    signature: "split(separator)",
    doc: "Splits each value at every occurrence of the separator.",
    params: &[SEPARATOR],
    apply: apply_split,
};

fn apply_split(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    let separator = call.value(0)?;
    Ok(input.on_resolved(|value| {
        if separator.is_empty() || !value.contains(separator) {
            Resolution::single(value)
        } else {
            Resolution::resolved(value.split(separator).map(str::to_string))
        }
    }))
}

/// `join(separator)`: collapses a multi-valued input into one value.
pub(crate) const JOIN: FunctionDescriptor = FunctionDescriptor {
    name: "join",
    signature: "join(separator)",
    doc: "Joins all values into one, separated by the separator.",
    params: &[SEPARATOR],
    apply: apply_join,
};

fn apply_join(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    let separator = call.value(0)?;
    Ok(match input {
        Resolution::Resolved(values) => Resolution::single(values.join(separator)),
        other => other,
    })
}
