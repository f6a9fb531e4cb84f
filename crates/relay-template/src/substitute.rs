//! Whole-template substitution with cartesian expansion.
//!
//! The driver walks the template's spans in order, folding each span's
//! values into a growing set of candidate output strings:
//! `candidates_before x values_of_this_span`. A `Deleted` result at any
//! span discards all accumulated partials and deletes the whole template.

use relay_placeholder::{parse, Error, Expression, ExpressionResolver, Resolution, Result};
use tracing::{debug, trace};

use crate::scanner;

/// Cap on the candidate set produced by cartesian expansion across spans.
pub(crate) const MAX_EXPANSION: usize = 1_000;

/// Resolve every span of `template` and reassemble the output.
///
/// `allowed_unresolved`: `None` for strict resolution; `Some(prefixes)`
/// for partial mode, where spans headed by a listed prefix may stay in the
/// output as literal `{{...}}` text when unresolved.
pub(crate) fn substitute(
    template: &str,
    resolver: &ExpressionResolver,
    allowed_unresolved: Option<&[&str]>,
) -> Result<Resolution> {
    let mut candidates = vec![String::new()];
    let mut cursor = 0;

    for span in scanner::spans(template) {
        let literal = &template[cursor..span.start];
        for candidate in &mut candidates {
            candidate.push_str(literal);
        }
        cursor = span.end;

        let expression = parse(span.expression)?;
        let resolved = match resolver.resolve_expression(&expression) {
            Ok(resolution) => resolution,
            Err(Error::UnresolvedPlaceholder { placeholder })
                if placeholder_allowed(&placeholder, allowed_unresolved) =>
            {
                // The raised placeholder (head or argument) has a listed
                // prefix: keep the whole span literal.
                let original = &template[span.start..span.end];
                for candidate in &mut candidates {
                    candidate.push_str(original);
                }
                continue;
            }
            Err(err) => return Err(err),
        };
        trace!(expression = span.expression, result = ?resolved, "span resolved");

        match resolved {
            Resolution::Deleted => {
                debug!(expression = span.expression, "span deleted the whole template");
                return Ok(Resolution::Deleted);
            }
            Resolution::Resolved(values) => {
                if candidates.len() * values.len() > MAX_EXPANSION {
                    return Err(Error::too_complex(format!(
                        "cartesian expansion exceeds {MAX_EXPANSION} candidate outputs"
                    )));
                }
                candidates = candidates
                    .iter()
                    .flat_map(|candidate| {
                        values.iter().map(move |value| {
                            let mut next = candidate.clone();
                            next.push_str(value);
                            next
                        })
                    })
                    .collect();
            }
            Resolution::Unresolved => {
                if prefix_allowed(&expression, allowed_unresolved) {
                    let original = &template[span.start..span.end];
                    for candidate in &mut candidates {
                        candidate.push_str(original);
                    }
                } else {
                    return Err(Error::unresolved(span.expression));
                }
            }
        }
    }

    let trailing = &template[cursor..];
    for candidate in &mut candidates {
        candidate.push_str(trailing);
    }
    Ok(Resolution::resolved(candidates))
}

/// Whether an unresolved span may stay literal: partial mode is on and the
/// span's head placeholder prefix is listed.
fn prefix_allowed(expression: &Expression, allowed: Option<&[&str]>) -> bool {
    match (expression.head_prefix(), allowed) {
        (Some(prefix), Some(allowed)) => allowed.contains(&prefix),
        _ => false,
    }
}

/// Whether a raised unresolvable placeholder may stay literal: partial
/// mode is on and the prefix of the placeholder that actually failed is
/// listed. The failure may come from a function argument, not the head.
fn placeholder_allowed(placeholder: &str, allowed: Option<&[&str]>) -> bool {
    match (placeholder.split_once(':'), allowed) {
        (Some((prefix, _)), Some(allowed)) => allowed.contains(&prefix),
        _ => false,
    }
}
