//! Validation rules, validators and error collection.
//!
//! An entity declares [`ValidationRule`]s. On each validation pass a
//! [`ValidatorFactory`] turns every rule into a [`Validator`]; validators
//! whose scenarios exclude the active one are skipped, and the rest append
//! messages to the entity's [`ValidationErrors`].

mod builtin;
mod errors;

pub use builtin::BuiltinValidators;
pub use errors::ValidationErrors;

use crate::entity::Entity;
use crate::error::CoreResult;
use fieldkit_value::{Map, Value};
use std::fmt;

/// A declared validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    kind: String,
    fields: Vec<String>,
    params: Map,
    scenarios: Vec<String>,
}

impl ValidationRule {
    /// Creates a rule of `kind` over `fields`.
    pub fn new<I, S>(fields: I, kind: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            params: Map::new(),
            scenarios: Vec::new(),
        }
    }

    /// Adds an extra parameter for the validator.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Restricts the rule to a scenario. May be called more than once.
    #[must_use]
    pub fn on(mut self, scenario: impl Into<String>) -> Self {
        self.scenarios.push(scenario.into());
        self
    }

    /// The validator kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The fields the rule checks.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Extra validator parameters.
    pub fn params(&self) -> &Map {
        &self.params
    }

    /// Scenarios the rule is limited to; empty means every scenario.
    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }
}

/// Returns true if a validator limited to `scenarios` runs under `active`.
pub fn scenario_applies(scenarios: &[String], active: &str) -> bool {
    scenarios.is_empty() || scenarios.iter().any(|s| s == active)
}

/// A validator bound to a set of fields.
pub trait Validator: fmt::Debug {
    /// The fields this validator checks.
    fn fields(&self) -> &[String];

    /// Scenarios the validator is limited to; empty means every scenario.
    fn scenarios(&self) -> &[String];

    /// Checks one field, appending messages to `errors`.
    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors);

    /// Returns true if the validator runs under the `active` scenario.
    fn applies_to(&self, active: &str) -> bool {
        scenario_applies(self.scenarios(), active)
    }

    /// Checks every bound field, or only those also listed in `only`.
    fn validate(&self, entity: &Entity, only: Option<&[String]>, errors: &mut ValidationErrors) {
        for field in self.fields() {
            if only.map_or(true, |only| only.contains(field)) {
                self.validate_field(entity, field, errors);
            }
        }
    }
}

/// Builds validators from rules.
pub trait ValidatorFactory {
    /// Creates the validator for `rule`.
    ///
    /// Unknown kinds and malformed parameters are errors.
    fn create(&self, rule: &ValidationRule) -> CoreResult<Box<dyn Validator>>;
}
