//! Error types for fieldkit core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in fieldkit core operations.
///
/// Validation failures are not errors: they are collected per field in
/// [`ValidationErrors`](crate::ValidationErrors). The variants here are
/// programming mistakes (a malformed rule, an unknown method) that the
/// caller should not paper over.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Value conversion error.
    #[error("value error: {0}")]
    Value(#[from] fieldkit_value::ValueError),

    /// A validation rule is malformed.
    #[error("{entity} has an invalid validation rule: {reason}")]
    InvalidRule {
        /// Name of the entity declaring the rule.
        entity: String,
        /// What is wrong with the rule.
        reason: String,
    },

    /// A validator parameter has the wrong shape.
    #[error("invalid parameter {param:?} for {kind} validator: {reason}")]
    InvalidParam {
        /// The validator kind.
        kind: String,
        /// The parameter name.
        param: String,
        /// What is wrong with the parameter.
        reason: String,
    },

    /// No validator is registered for a rule kind.
    #[error("unknown validator kind: {kind}")]
    UnknownValidator {
        /// The rule kind.
        kind: String,
    },

    /// A bitmask pattern is not a binary string.
    #[error("invalid bitmask pattern: {pattern:?}")]
    InvalidMask {
        /// The rejected pattern.
        pattern: String,
    },

    /// A method call matched neither an accessor nor a module handler.
    #[error("unknown method: {method}")]
    UnknownMethod {
        /// The method name.
        method: String,
    },

    /// A module handler failed.
    #[error("module {module} failed: {message}")]
    ModuleFailed {
        /// The module name.
        module: String,
        /// Description of the failure.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid rule error.
    pub fn invalid_rule(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(
        kind: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParam {
            kind: kind.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown validator error.
    pub fn unknown_validator(kind: impl Into<String>) -> Self {
        Self::UnknownValidator { kind: kind.into() }
    }

    /// Creates an invalid mask error.
    pub fn invalid_mask(pattern: impl Into<String>) -> Self {
        Self::InvalidMask {
            pattern: pattern.into(),
        }
    }

    /// Creates an unknown method error.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    /// Creates a module failure error.
    pub fn module_failed(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModuleFailed {
            module: module.into(),
            message: message.into(),
        }
    }
}
