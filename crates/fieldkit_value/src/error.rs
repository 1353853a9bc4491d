//! Error types for the value crate.

use thiserror::Error;

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur when converting or parsing values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Text could not be read as a number.
    #[error("invalid number: {input:?}")]
    InvalidNumber {
        /// The rejected input.
        input: String,
    },

    /// A value had a different shape than the caller required.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the expected type.
        expected: &'static str,
        /// Name of the type that was found.
        found: &'static str,
    },

    /// JSON input could not be parsed.
    #[error("invalid JSON: {message}")]
    Json {
        /// Description of the parse error.
        message: String,
    },
}

impl ValueError {
    /// Create an invalid number error.
    pub fn invalid_number(input: impl Into<String>) -> Self {
        Self::InvalidNumber {
            input: input.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }
}

impl From<serde_json::Error> for ValueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
