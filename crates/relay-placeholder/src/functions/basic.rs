//! Seed control: `default` and `delete`.

use crate::error::Result;
use crate::executor::Invocation;
use crate::registry::{FunctionDescriptor, ParamSpec};
use crate::resolution::Resolution;

/// `default(value)`: replaces only an unresolved input.
///
/// An unresolved reference argument leaves the input untouched, so
/// `fn:default(header:other)` is a no-op when `other` is absent too.
pub(crate) const DEFAULT: FunctionDescriptor = FunctionDescriptor {
    name: "default",
    signature: "default(value)",
    doc: "Replaces an unresolved input with the given value.",
    params: &[ParamSpec {
        name: "value",
        doc: "Replacement literal or placeholder reference.",
        required: true,
        accepts_unresolved: true,
    }],
    apply: apply_default,
};

fn apply_default(input: Resolution, call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.on_unresolved(|| call.arg(0).clone()))
}

/// `delete()`: unconditional deletion of the whole result.
pub(crate) const DELETE: FunctionDescriptor = FunctionDescriptor {
    name: "delete",
    signature: "delete()",
    doc: "Marks the whole result as deleted; nothing downstream can undo it.",
    params: &[],
    apply: apply_delete,
};

fn apply_delete(_input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(Resolution::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke(descriptor: &'static FunctionDescriptor, args: Vec<Resolution>) -> Invocation<'static> {
        let given = args.len();
        Invocation {
            descriptor,
            args,
            given,
        }
    }

    #[test]
    fn default_replaces_only_unresolved() {
        let call = invoke(&DEFAULT, vec![Resolution::single("fallback")]);
        assert_eq!(
            apply_default(Resolution::Unresolved, &call).unwrap(),
            Resolution::single("fallback")
        );
        assert_eq!(
            apply_default(Resolution::single("kept"), &call).unwrap(),
            Resolution::single("kept")
        );
        assert_eq!(
            apply_default(Resolution::Deleted, &call).unwrap(),
            Resolution::Deleted
        );
    }

    #[test]
    fn default_with_unresolved_argument_passes_through() {
        let call = invoke(&DEFAULT, vec![Resolution::Unresolved]);
        assert_eq!(
            apply_default(Resolution::Unresolved, &call).unwrap(),
            Resolution::Unresolved
        );
    }

    #[test]
    fn delete_is_absolute() {
        let call = invoke(&DELETE, vec![]);
        assert_eq!(
            apply_delete(Resolution::single("anything"), &call).unwrap(),
            Resolution::Deleted
        );
        assert_eq!(
            apply_delete(Resolution::Unresolved, &call).unwrap(),
            Resolution::Deleted
        );
    }
}
