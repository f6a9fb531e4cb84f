//! `{{ ... }}` span scanning.

use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy, so `}}` closes the nearest open span. Dot-all keeps
/// multi-line templates working.
static SPAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("span pattern compiles"));

/// One placeholder span in a template.
pub(crate) struct Span<'t> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
    /// Expression text with braces and outer whitespace stripped.
    pub expression: &'t str,
}

/// All spans of a template, in order.
pub(crate) fn spans(template: &str) -> impl Iterator<Item = Span<'_>> {
    SPAN_PATTERN.captures_iter(template).map(|caps| {
        let whole = caps.get(0).expect("match always has a whole span");
        let inner = caps.get(1).expect("span pattern has one capture group");
        Span {
            start: whole.start(),
            end: whole.end(),
            expression: inner.as_str().trim(),
        }
    })
}
