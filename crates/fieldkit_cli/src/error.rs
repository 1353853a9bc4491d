//! CLI error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading input or parsing arguments.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("{path:?}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A file did not hold valid JSON.
    #[error("{path:?}: {source}")]
    Value {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: fieldkit_value::ValueError,
    },

    /// The input had the wrong shape.
    #[error("{path:?}: expected {expected}")]
    Shape {
        /// The file involved.
        path: PathBuf,
        /// What was expected.
        expected: &'static str,
    },

    /// A `--set` argument could not be parsed.
    #[error("invalid assignment {0:?}: expected name=value or name:type=value")]
    Assignment(String),

    /// A rule entry could not be parsed.
    #[error("rule #{index}: {reason}")]
    Rule {
        /// Position of the rule in the list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// An entity operation failed.
    #[error(transparent)]
    Core(#[from] fieldkit_core::CoreError),
}
