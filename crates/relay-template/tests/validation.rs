//! Validation-session behavior: checking templates without live lookups.

use relay_placeholder::{PlaceholderSource, StaticSource};
use relay_template::{Error, TemplateResolver};

/// Source with a fixed name list, like a `thing:`-style placeholder.
struct FixedNames(&'static [&'static str]);

impl PlaceholderSource for FixedNames {
    fn supports(&self, name: &str) -> bool {
        self.0.contains(&name)
    }

    fn lookup(&self, _name: &str) -> Vec<String> {
        Vec::new()
    }
}

fn validator() -> TemplateResolver {
    TemplateResolver::builder()
        .source("header", StaticSource::new())
        .source("thing", FixedNames(&["id", "name", "namespace"]))
        .build_validator("dummy")
}

#[test]
fn valid_template_passes_silently() {
    let session = validator();
    assert!(session
        .validate("{{ header:device_id | fn:lower() }}/{{ thing:id }}")
        .is_ok());
}

#[test]
fn unknown_function_is_rejected() {
    let err = validator()
        .validate("{{ header:x | fn:frobnicate() }}")
        .unwrap_err();
    assert_eq!(err, Error::unknown_function("frobnicate"));
}

#[test]
fn bad_arity_is_rejected() {
    let err = validator()
        .validate("{{ header:x | fn:upper('extra') }}")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFunctionSignature { .. }));
}

#[test]
fn unsupported_name_is_rejected() {
    let err = validator().validate("{{ thing:bogus }}").unwrap_err();
    assert_eq!(err, Error::unresolved("thing:bogus"));
}

#[test]
fn unknown_prefix_is_rejected() {
    let err = validator().validate("{{ nowhere:x }}").unwrap_err();
    assert_eq!(err, Error::unresolved("nowhere:x"));
}

#[test]
fn stage_cap_is_checked() {
    let template = format!("{{{{ header:x{} }}}}", " | fn:trim()".repeat(11));
    assert!(matches!(
        validator().validate(&template),
        Err(Error::TooComplex { .. })
    ));
}

#[test]
fn validate_and_replace_substitutes_the_dummy() {
    let out = validator()
        .validate_and_replace("{{ header:device_id }}/{{ thing:id | fn:upper() }}")
        .unwrap();
    assert_eq!(out, vec!["dummy/DUMMY".to_string()]);
}

#[test]
fn validate_and_replace_on_a_deleting_template_is_empty() {
    let out = validator()
        .validate_and_replace("{{ fn:delete() }}anything")
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn validation_mode_does_not_call_lookup() {
    // FixedNames::lookup returns nothing, yet the dummy is substituted.
    let out = validator().validate_and_replace("{{ thing:name }}").unwrap();
    assert_eq!(out, vec!["dummy".to_string()]);
}
