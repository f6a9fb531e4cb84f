//! Three-valued resolution algebra.
//!
//! Every pipeline stage consumes and produces a [`Resolution`]. The three
//! variants form a small lattice the whole engine reasons in:
//!
//! - [`Resolution::Resolved`] — one or more values were produced
//! - [`Resolution::Unresolved`] — no value; downstream stages pass it
//!   through untouched (only `fn:default` intercepts it)
//! - [`Resolution::Deleted`] — the entire result is to be discarded;
//!   absolute, nothing downstream can undo it
//!
//! A `Resolved` never holds an empty value list; the [`Resolution::resolved`]
//! constructor collapses an empty list to `Unresolved`.

/// Outcome of resolving a placeholder, a pipeline stage, or a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one value, in order. Never empty.
    Resolved(Vec<String>),
    /// No value was produced.
    Unresolved,
    /// The whole result is to be discarded.
    Deleted,
}

impl Resolution {
    /// Build a `Resolved` from an ordered value list.
    ///
    /// An empty list collapses to `Unresolved`, preserving the non-empty
    /// invariant of the `Resolved` variant.
    pub fn resolved<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Resolution::Unresolved
        } else {
            Resolution::Resolved(values)
        }
    }

    /// Build a single-valued `Resolved`.
    pub fn single(value: impl Into<String>) -> Self {
        Resolution::Resolved(vec![value.into()])
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Resolution::Deleted)
    }

    /// Values of a `Resolved`, empty for the other variants.
    pub fn values(&self) -> &[String] {
        match self {
            Resolution::Resolved(values) => values,
            _ => &[],
        }
    }

    /// First value of a `Resolved`, `None` otherwise.
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    /// Iterate over the values of a `Resolved`; yields nothing otherwise.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.values().iter()
    }

    /// Apply `f` to each value of a `Resolved` and flatten the outputs.
    ///
    /// Flattening rule: any element mapping to `Deleted` deletes the whole
    /// result; surviving `Resolved` values concatenate in order; if nothing
    /// survives the result is `Unresolved`. Non-`Resolved` inputs pass
    /// through untouched. This is also how a multi-valued upstream flows
    /// through the next stage element by element.
    pub fn on_resolved<F>(self, mut f: F) -> Resolution
    where
        F: FnMut(&str) -> Resolution,
    {
        match self {
            Resolution::Resolved(values) => {
                let mut out = Vec::new();
                for value in &values {
                    match f(value) {
                        Resolution::Resolved(mut produced) => out.append(&mut produced),
                        Resolution::Unresolved => {}
                        Resolution::Deleted => return Resolution::Deleted,
                    }
                }
                Resolution::resolved(out)
            }
            other => other,
        }
    }

    /// Specialization of [`Resolution::on_resolved`] for value-to-value maps.
    pub fn map<F>(self, mut f: F) -> Resolution
    where
        F: FnMut(&str) -> String,
    {
        self.on_resolved(|value| Resolution::single(f(value)))
    }

    /// Replace an `Unresolved` with the supplier's output; pass everything
    /// else through.
    pub fn on_unresolved<F>(self, f: F) -> Resolution
    where
        F: FnOnce() -> Resolution,
    {
        match self {
            Resolution::Unresolved => f(),
            other => other,
        }
    }

    /// Replace a `Deleted` with the supplier's output; pass everything else
    /// through.
    pub fn on_deleted<F>(self, f: F) -> Resolution
    where
        F: FnOnce() -> Resolution,
    {
        match self {
            Resolution::Deleted => f(),
            other => other,
        }
    }

    /// Join two independent results for the same slot.
    ///
    /// `Unresolved` yields to `other`; `Resolved` and `Deleted` win
    /// regardless of `other`. Associative.
    pub fn or_else(self, other: Resolution) -> Resolution {
        match self {
            Resolution::Unresolved => other,
            decided => decided,
        }
    }

    /// Combine two sequential stage outputs.
    ///
    /// `Deleted` from either side wins; `Unresolved` loses to the other
    /// side. Stage evaluation is sequential, so two simultaneous `Resolved`
    /// outputs cannot occur; that case aborts.
    ///
    /// # Panics
    ///
    /// Panics if both sides are `Resolved`.
    pub fn merge_sequential(self, other: Resolution) -> Resolution {
        match (self, other) {
            (Resolution::Deleted, _) | (_, Resolution::Deleted) => Resolution::Deleted,
            (Resolution::Unresolved, other) => other,
            (this, Resolution::Unresolved) => this,
            (Resolution::Resolved(_), Resolution::Resolved(_)) => {
                panic!("BUG: two resolved values in sequential stage combination")
            }
        }
    }
}

impl<'a> IntoIterator for &'a Resolution {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(values: &[&str]) -> Resolution {
        Resolution::resolved(values.iter().copied())
    }

    #[test]
    fn empty_resolved_collapses_to_unresolved() {
        assert_eq!(
            Resolution::resolved(Vec::<String>::new()),
            Resolution::Unresolved
        );
    }

    #[test]
    fn or_else_lattice_laws() {
        let x = Resolution::single("x");

        assert_eq!(
            Resolution::Deleted.or_else(x.clone()),
            Resolution::Deleted
        );
        assert_eq!(
            Resolution::single("v").or_else(x.clone()),
            Resolution::single("v")
        );
        assert_eq!(
            Resolution::single("v").or_else(Resolution::Deleted),
            Resolution::single("v")
        );
        assert_eq!(Resolution::Unresolved.or_else(x.clone()), x);
    }

    #[test]
    fn or_else_is_associative() {
        let cases = [
            Resolution::single("a"),
            Resolution::Unresolved,
            Resolution::Deleted,
        ];
        for a in &cases {
            for b in &cases {
                for c in &cases {
                    let left = a.clone().or_else(b.clone()).or_else(c.clone());
                    let right = a.clone().or_else(b.clone().or_else(c.clone()));
                    assert_eq!(left, right, "a={a:?} b={b:?} c={c:?}");
                }
            }
        }
    }

    #[test]
    fn on_resolved_flattens_in_order() {
        let result = resolved(&["a", "b"]).on_resolved(|v| {
            Resolution::resolved(vec![format!("{v}1"), format!("{v}2")])
        });
        assert_eq!(result, resolved(&["a1", "a2", "b1", "b2"]));
    }

    #[test]
    fn on_resolved_drops_unresolved_elements() {
        let result = resolved(&["keep", "drop"]).on_resolved(|v| {
            if v == "keep" {
                Resolution::single(v)
            } else {
                Resolution::Unresolved
            }
        });
        assert_eq!(result, Resolution::single("keep"));
    }

    #[test]
    fn on_resolved_all_dropped_is_unresolved() {
        let result = resolved(&["a", "b"]).on_resolved(|_| Resolution::Unresolved);
        assert_eq!(result, Resolution::Unresolved);
    }

    #[test]
    fn on_resolved_deletion_wins() {
        let result = resolved(&["a", "b"]).on_resolved(|_| Resolution::Deleted);
        assert_eq!(result, Resolution::Deleted);
    }

    #[test]
    fn on_resolved_passes_other_variants_through() {
        assert_eq!(
            Resolution::Unresolved.on_resolved(|_| Resolution::single("x")),
            Resolution::Unresolved
        );
        assert_eq!(
            Resolution::Deleted.on_resolved(|_| Resolution::single("x")),
            Resolution::Deleted
        );
    }

    #[test]
    fn on_unresolved_intercepts_only_unresolved() {
        assert_eq!(
            Resolution::Unresolved.on_unresolved(|| Resolution::single("fallback")),
            Resolution::single("fallback")
        );
        assert_eq!(
            Resolution::single("v").on_unresolved(|| Resolution::single("fallback")),
            Resolution::single("v")
        );
        assert_eq!(
            Resolution::Deleted.on_unresolved(|| Resolution::single("fallback")),
            Resolution::Deleted
        );
    }

    #[test]
    fn on_deleted_intercepts_only_deleted() {
        assert_eq!(
            Resolution::Deleted.on_deleted(|| Resolution::Unresolved),
            Resolution::Unresolved
        );
        assert_eq!(
            Resolution::single("v").on_deleted(|| Resolution::Unresolved),
            Resolution::single("v")
        );
    }

    #[test]
    fn map_rewrites_each_value() {
        assert_eq!(
            resolved(&["a", "b"]).map(|v| v.to_uppercase()),
            resolved(&["A", "B"])
        );
    }

    #[test]
    fn merge_sequential_deleted_wins() {
        assert_eq!(
            Resolution::Deleted.merge_sequential(Resolution::single("v")),
            Resolution::Deleted
        );
        assert_eq!(
            Resolution::Unresolved.merge_sequential(Resolution::Deleted),
            Resolution::Deleted
        );
    }

    #[test]
    fn merge_sequential_unresolved_loses() {
        assert_eq!(
            Resolution::Unresolved.merge_sequential(Resolution::single("v")),
            Resolution::single("v")
        );
        assert_eq!(
            Resolution::single("v").merge_sequential(Resolution::Unresolved),
            Resolution::single("v")
        );
    }

    #[test]
    #[should_panic(expected = "BUG: two resolved values")]
    fn merge_sequential_two_resolved_aborts() {
        let _ = Resolution::single("a").merge_sequential(Resolution::single("b"));
    }

    #[test]
    fn iteration_yields_values_only_for_resolved() {
        assert_eq!(resolved(&["a", "b"]).iter().count(), 2);
        assert_eq!(Resolution::Unresolved.iter().count(), 0);
        assert_eq!(Resolution::Deleted.iter().count(), 0);
    }
}
