//! String normalization and slicing functions.
//!
//! All of these operate per value via the algebra's `map`/`on_resolved`, so
//! a multi-valued input flows through element by element.

use crate::error::Result;
use crate::executor::Invocation;
use crate::registry::{FunctionDescriptor, ParamSpec};
use crate::resolution::Resolution;

const SEPARATOR: ParamSpec = ParamSpec {
    name: "separator",
    doc: "Literal separator to split at.",
    required: true,
    accepts_unresolved: false,
};

pub(crate) const LOWER: FunctionDescriptor = FunctionDescriptor {
    name: "lower",
    signature: "lower()",
    doc: "Lowercases each value.",
    params: &[],
    apply: apply_lower,
};

fn apply_lower(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.map(|value| value.to_lowercase()))
}

pub(crate) const UPPER: FunctionDescriptor = FunctionDescriptor {
    name: "upper",
    signature: "upper()",
    doc: "Uppercases each value.",
    params: &[],
    apply: apply_upper,
};

fn apply_upper(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.map(|value| value.to_uppercase()))
}

pub(crate) const TRIM: FunctionDescriptor = FunctionDescriptor {
    name: "trim",
    signature: "trim()",
    doc: "Trims leading and trailing whitespace from each value.",
    params: &[],
    apply: apply_trim,
};

fn apply_trim(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.map(|value| value.trim().to_string()))
}

pub(crate) const REPLACE: FunctionDescriptor = FunctionDescriptor {
    name: "replace",
    signature: "replace(from, to)",
    doc: "Replaces all literal occurrences of `from` with `to`.",
    params: &[
        ParamSpec {
            name: "from",
            doc: "Substring to replace.",
            required: true,
            accepts_unresolved: false,
        },
        ParamSpec {
            name: "to",
            doc: "Replacement text.",
            required: true,
            accepts_unresolved: false,
        },
    ],
    apply: apply_replace,
};

fn apply_replace(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    let from = call.value(0)?;
    let to = call.value(1)?;
    Ok(input.map(|value| value.replace(from, to)))
}

pub(crate) const SUBSTRING_BEFORE: FunctionDescriptor = FunctionDescriptor {
    name: "substring-before",
    signature: "substring-before(separator)",
    doc: "Keeps the part before the first occurrence of the separator; \
          unresolved when the separator is absent.",
    params: &[SEPARATOR],
    apply: apply_substring_before,
};

fn apply_substring_before(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    let separator = call.value(0)?;
    Ok(input.on_resolved(|value| match value.find(separator) {
        Some(idx) => Resolution::single(&value[..idx]),
        None => Resolution::Unresolved,
    }))
}

pub(crate) const SUBSTRING_AFTER: FunctionDescriptor = FunctionDescriptor {
    name: "substring-after",
    signature: "substring-after(separator)",
    doc: "Keeps the part after the first occurrence of the separator; \
          unresolved when the separator is absent.",
    params: &[SEPARATOR],
    apply: apply_substring_after,
};

fn apply_substring_after(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    let separator = call.value(0)?;
    Ok(input.on_resolved(|value| match value.find(separator) {
        Some(idx) => Resolution::single(&value[idx + separator.len()..]),
        None => Resolution::Unresolved,
    }))
}
