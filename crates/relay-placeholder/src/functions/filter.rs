//! The `filter` function and its predicate library.
//!
//! `filter` keeps or drops the pipeline input based on a named predicate
//! over a value and an optional comparison operand. Matching is existential
//! over all combinations of the (possibly multi-valued or unresolved)
//! value and operand.
//!
//! Accepted shapes:
//! - `filter('exists')` — predicate over the pipeline input itself
//! - `filter(operation, compared)` — input as the value, when the first
//!   argument names a predicate; otherwise `filter(value, 'exists')`
//! - `filter(value, operation, compared)`
//!
//! A single-valued input whose text is a JSON array is filtered per
//! element; survivors are re-serialized (an empty array is kept as `[]`).

use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::executor::Invocation;
use crate::registry::{FunctionDescriptor, ParamSpec};
use crate::resolution::Resolution;

/// Known predicate names.
const PREDICATES: &[&str] = &["eq", "ne", "like", "exists"];

pub(crate) const FILTER: FunctionDescriptor = FunctionDescriptor {
    name: "filter",
    signature: "filter(value, operation, compared) | filter(operation, compared) | filter('exists')",
    doc: "Keeps the input when the predicate matches, otherwise yields \
          unresolved.",
    params: &[
        ParamSpec {
            name: "value",
            doc: "Value under test, or the predicate name in the short forms.",
            required: true,
            accepts_unresolved: true,
        },
        ParamSpec {
            name: "operation",
            doc: "Predicate name: eq, ne, like or exists.",
            required: false,
            accepts_unresolved: true,
        },
        ParamSpec {
            name: "compared",
            doc: "Comparison operand; optional for exists.",
            required: false,
            accepts_unresolved: true,
        },
    ],
    apply: apply_filter,
};

struct FilterCall<'a> {
    value: &'a Resolution,
    operation: &'a str,
    compared: Option<&'a Resolution>,
    /// Whether the value under test is the pipeline input itself.
    value_is_input: bool,
}

fn apply_filter(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    if !input.is_resolved() {
        return Ok(input);
    }

    let spec = disambiguate(&input, call)?;
    if !PREDICATES.contains(&spec.operation) {
        return Err(call.signature_error());
    }

    if spec.value_is_input {
        if let Some(filtered) = filter_json_array(&input, &spec) {
            return Ok(filtered);
        }
    }

    let matched = predicate_matches(spec.operation, spec.value, spec.compared);
    trace!(operation = spec.operation, matched, "filter evaluated");
    if matched {
        Ok(input)
    } else {
        Ok(Resolution::Unresolved)
    }
}

/// Map the written argument count onto (value, operation, compared).
fn disambiguate<'a>(
    input: &'a Resolution,
    call: &'a Invocation<'_>,
) -> Result<FilterCall<'a>> {
    match call.given {
        1 => {
            let operation = call.value(0)?;
            if operation != "exists" {
                return Err(call.signature_error());
            }
            Ok(FilterCall {
                value: input,
                operation,
                compared: None,
                value_is_input: true,
            })
        }
        2 => match call.arg(0).first() {
            Some(op) if PREDICATES.contains(&op) => Ok(FilterCall {
                value: input,
                operation: op,
                compared: Some(call.arg(1)),
                value_is_input: true,
            }),
            _ => {
                let operation = call.value(1)?;
                if operation != "exists" {
                    return Err(call.signature_error());
                }
                Ok(FilterCall {
                    value: call.arg(0),
                    operation,
                    compared: None,
                    value_is_input: false,
                })
            }
        },
        3 => Ok(FilterCall {
            value: call.arg(0),
            operation: call.value(1)?,
            compared: Some(call.arg(2)),
            value_is_input: false,
        }),
        _ => Err(call.signature_error()),
    }
}

/// Existential match over all value/operand combinations.
fn predicate_matches(operation: &str, value: &Resolution, compared: Option<&Resolution>) -> bool {
    match operation {
        "exists" => {
            let expected = compared
                .and_then(|c| c.first())
                .map_or(true, |c| c == "true");
            value.is_resolved() == expected
        }
        _ => {
            let Some(compared) = compared else {
                return false;
            };
            value
                .iter()
                .any(|v| compared.iter().any(|c| compare(operation, v, c)))
        }
    }
}

fn compare(operation: &str, value: &str, compared: &str) -> bool {
    match operation {
        "eq" => value == compared,
        "ne" => value != compared,
        "like" => like_pattern(compared).is_some_and(|re| re.is_match(value)),
        _ => false,
    }
}

/// Translate a wildcard pattern (`*` any run, `?` any one character) into
/// an anchored regex.
fn like_pattern(pattern: &str) -> Option<Regex> {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for c in pattern.chars() {
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            other => translated.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    translated.push('$');
    Regex::new(&translated).ok()
}

/// Per-element filtering for a JSON-array-shaped input.
fn filter_json_array(input: &Resolution, spec: &FilterCall<'_>) -> Option<Resolution> {
    let [value] = input.values() else {
        return None;
    };
    let parsed: serde_json::Value = serde_json::from_str(value.trim()).ok()?;
    let serde_json::Value::Array(elements) = parsed else {
        return None;
    };

    let survivors: Vec<serde_json::Value> = elements
        .into_iter()
        .filter(|element| {
            let text = match element {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            predicate_matches(spec.operation, &Resolution::single(text), spec.compared)
        })
        .collect();

    Some(Resolution::single(
        serde_json::Value::Array(survivors).to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resolver::{ExpressionResolver, StaticSource};

    fn session() -> ExpressionResolver {
        ExpressionResolver::new().with_source(
            "header",
            StaticSource::new()
                .with("qos", "1")
                .with("reply-to", "commands/device")
                .with_values("tags", ["alpha", "beta"]),
        )
    }

    #[test]
    fn eq_keeps_input_on_match() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:qos, 'eq', '1')")
            .unwrap();
        assert_eq!(out, Resolution::single("commands/device"));
    }

    #[test]
    fn eq_mismatch_is_unresolved() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:qos, 'eq', '0')")
            .unwrap();
        assert_eq!(out, Resolution::Unresolved);
    }

    #[test]
    fn ne_matches_any_combination() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:tags, 'ne', 'alpha')")
            .unwrap();
        // "beta" != "alpha" is one matching combination.
        assert_eq!(out, Resolution::single("commands/device"));
    }

    #[test]
    fn like_uses_wildcards() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:reply-to, 'like', 'commands/*')")
            .unwrap();
        assert_eq!(out, Resolution::single("commands/device"));

        let out = session()
            .resolve("header:reply-to | fn:filter(header:reply-to, 'like', 'events/*')")
            .unwrap();
        assert_eq!(out, Resolution::Unresolved);
    }

    #[test]
    fn like_escapes_regex_metacharacters() {
        let resolver = ExpressionResolver::new()
            .with_source("header", StaticSource::new().with("v", "a.b"));
        assert_eq!(
            resolver
                .resolve("header:v | fn:filter(header:v, 'like', 'a.b')")
                .unwrap(),
            Resolution::single("a.b")
        );
        // The dot is literal: "axb" must not match.
        let resolver = ExpressionResolver::new()
            .with_source("header", StaticSource::new().with("v", "axb"));
        assert_eq!(
            resolver
                .resolve("header:v | fn:filter(header:v, 'like', 'a.b')")
                .unwrap(),
            Resolution::Unresolved
        );
    }

    #[test]
    fn exists_defaults_to_expected_true() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:qos, 'exists')")
            .unwrap();
        assert_eq!(out, Resolution::single("commands/device"));

        let out = session()
            .resolve("header:reply-to | fn:filter(header:missing, 'exists')")
            .unwrap();
        assert_eq!(out, Resolution::Unresolved);
    }

    #[test]
    fn exists_false_matches_unresolved_value() {
        let out = session()
            .resolve("header:reply-to | fn:filter(header:missing, 'exists', 'false')")
            .unwrap();
        assert_eq!(out, Resolution::single("commands/device"));
    }

    #[test]
    fn single_argument_exists_tests_the_input() {
        let out = session()
            .resolve("header:reply-to | fn:filter('exists')")
            .unwrap();
        assert_eq!(out, Resolution::single("commands/device"));
    }

    #[test]
    fn two_argument_form_tests_the_input() {
        let out = session()
            .resolve("header:qos | fn:filter('eq', '1')")
            .unwrap();
        assert_eq!(out, Resolution::single("1"));

        let out = session()
            .resolve("header:qos | fn:filter('eq', '0')")
            .unwrap();
        assert_eq!(out, Resolution::Unresolved);
    }

    #[test]
    fn json_array_input_filters_per_element() {
        let resolver = ExpressionResolver::new().with_source(
            "header",
            StaticSource::new().with("topics", r#"["commands/a","events/b","commands/c"]"#),
        );
        let out = resolver
            .resolve("header:topics | fn:filter('like', 'commands/*')")
            .unwrap();
        assert_eq!(
            out,
            Resolution::single(r#"["commands/a","commands/c"]"#)
        );
    }

    #[test]
    fn json_array_with_no_survivors_is_empty() {
        let resolver = ExpressionResolver::new().with_source(
            "header",
            StaticSource::new().with("topics", r#"["events/a"]"#),
        );
        let out = resolver
            .resolve("header:topics | fn:filter('like', 'commands/*')")
            .unwrap();
        assert_eq!(out, Resolution::single("[]"));
    }

    #[test]
    fn unknown_operation_is_a_signature_error() {
        let err = session()
            .resolve("header:reply-to | fn:filter(header:qos, 'gt', '0')")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFunctionSignature { .. }));
    }

    #[test]
    fn filter_is_a_noop_on_unresolved_input() {
        let out = session()
            .resolve("header:missing | fn:filter(header:qos, 'eq', '1')")
            .unwrap();
        assert_eq!(out, Resolution::Unresolved);
    }
}
