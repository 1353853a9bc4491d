//! Rule-driven validation of an entity's fields.

use super::Entity;
use crate::error::{CoreError, CoreResult};
use crate::validation::{ValidationErrors, ValidationRule, Validator, ValidatorFactory};
use std::mem;
use tracing::{debug, warn};

impl Entity {
    /// The declared rules.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Declares another rule.
    pub fn add_rule(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replaces every declared rule.
    pub fn set_rules(&mut self, rules: Vec<ValidationRule>) {
        self.rules = rules;
    }

    /// Builds a validator for every declared rule.
    ///
    /// A rule without a kind or without fields is an error, as is anything
    /// the factory rejects.
    pub fn create_validators(
        &self,
        factory: &dyn ValidatorFactory,
    ) -> CoreResult<Vec<Box<dyn Validator>>> {
        self.rules
            .iter()
            .map(|rule| {
                let reason = if rule.kind().is_empty() {
                    Some("missing validator kind")
                } else if rule.fields().is_empty() {
                    Some("no fields to validate")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    warn!(entity = %self.name, kind = rule.kind(), reason, "invalid validation rule");
                    return Err(CoreError::invalid_rule(&self.name, reason));
                }
                factory.create(rule)
            })
            .collect()
    }

    /// Validators that run under the current scenario, optionally only
    /// those bound to `field`.
    pub fn validators(
        &self,
        factory: &dyn ValidatorFactory,
        field: Option<&str>,
    ) -> CoreResult<Vec<Box<dyn Validator>>> {
        let validators = self.create_validators(factory)?;
        Ok(validators
            .into_iter()
            .filter(|v| v.applies_to(&self.scenario))
            .filter(|v| field.map_or(true, |field| v.fields().iter().any(|f| f == field)))
            .collect())
    }

    /// Runs the applicable validators and reports whether the entity is
    /// free of errors.
    ///
    /// With `fields`, only validators bound to at least one of them run,
    /// and only on those fields. With `clear_errors`, previous messages
    /// are dropped first.
    pub fn validate(
        &mut self,
        fields: Option<&[&str]>,
        clear_errors: bool,
        factory: &dyn ValidatorFactory,
    ) -> CoreResult<bool> {
        if clear_errors {
            self.errors.clear(None);
        }
        let validators = self.validators(factory, None)?;
        let only: Option<Vec<String>> =
            fields.map(|fields| fields.iter().map(|f| f.to_string()).collect());

        let mut errors = mem::take(&mut self.errors);
        let mut ran = 0usize;
        for validator in &validators {
            if let Some(only) = &only {
                if !validator.fields().iter().any(|f| only.contains(f)) {
                    continue;
                }
            }
            validator.validate(self, only.as_deref(), &mut errors);
            ran += 1;
        }
        self.errors = errors;

        debug!(
            entity = %self.name,
            scenario = %self.scenario,
            validators = ran,
            failed_fields = self.errors.len(),
            "validated"
        );
        Ok(self.errors.is_empty())
    }

    /// Collected validation messages.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns true if `field` (or, with `None`, any field) has errors.
    pub fn has_errors(&self, field: Option<&str>) -> bool {
        self.errors.has(field)
    }

    /// The first message for `field`, or the first overall.
    pub fn error(&self, field: Option<&str>) -> Option<&str> {
        self.errors.first(field)
    }

    /// Records a message for `field`.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Drops the messages for `field`, or all of them.
    pub fn clear_errors(&mut self, field: Option<&str>) {
        self.errors.clear(field);
    }

    /// The active validation scenario; empty by default.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Switches the validation scenario.
    pub fn set_scenario(&mut self, scenario: impl Into<String>) {
        self.scenario = scenario.into();
    }
}
