//! Engine errors.
//!
//! All four variants are synchronous, non-retryable user-input errors. The
//! only in-engine recovery mechanisms are `fn:default` and the template
//! driver's partial-resolution mode.

use thiserror::Error;

/// Engine result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unknown prefix or unsupported name, or no fallback applied.
    #[error("placeholder could not be resolved: {placeholder}")]
    UnresolvedPlaceholder { placeholder: String },

    /// Unrecognized `fn:` stage.
    #[error("unknown function: fn:{name}")]
    UnknownFunction { name: String },

    /// Argument shape does not match the function's declared signature.
    #[error("invalid signature for fn:{function}, expected {signature}")]
    InvalidFunctionSignature { function: String, signature: String },

    /// A complexity bound was exceeded (stage cap or expansion cap).
    #[error("expression too complex: {detail}")]
    TooComplex { detail: String },
}

impl Error {
    pub fn unresolved(placeholder: impl Into<String>) -> Self {
        Error::UnresolvedPlaceholder {
            placeholder: placeholder.into(),
        }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Error::UnknownFunction { name: name.into() }
    }

    pub fn invalid_signature(function: impl Into<String>, signature: impl Into<String>) -> Self {
        Error::InvalidFunctionSignature {
            function: function.into(),
            signature: signature.into(),
        }
    }

    pub fn too_complex(detail: impl Into<String>) -> Self {
        Error::TooComplex {
            detail: detail.into(),
        }
    }
}
