//! Validate command implementation.
//!
//! Rules are read from a JSON list of objects:
//!
//! ```json
//! [
//!   {"kind": "required", "fields": ["title", "text"]},
//!   {"kind": "number", "fields": "blog_id", "on": ["publish"], "min": 1}
//! ]
//! ```
//!
//! `fields` and `on` take a list or a comma-separated string. Every other
//! key is passed to the validator as a parameter.

use super::{load_record, read_json};
use crate::error::CliError;
use fieldkit_arrays::value_to_list;
use fieldkit_core::{BuiltinValidators, Entity, ValidationErrors, ValidationRule};
use fieldkit_value::Value;
use serde::Serialize;
use std::path::Path;
use tracing::info;

const RESERVED_KEYS: [&str; 3] = ["kind", "fields", "on"];

/// Validation outcome.
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    /// True when no rule reported an error.
    pub valid: bool,
    /// Scenario the rules ran under.
    pub scenario: String,
    /// Messages by field.
    pub errors: ValidationErrors,
}

/// Parses a rule list.
pub fn parse_rules(value: &Value) -> Result<Vec<ValidationRule>, CliError> {
    let items = value.as_list().ok_or_else(|| CliError::Rule {
        index: 0,
        reason: format!("expected a list of rules, found {}", value.type_name()),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_rule(index, item))
        .collect()
}

fn parse_rule(index: usize, item: &Value) -> Result<ValidationRule, CliError> {
    let map = item.as_map().ok_or_else(|| CliError::Rule {
        index,
        reason: format!("expected an object, found {}", item.type_name()),
    })?;
    let kind = map
        .get("kind")
        .and_then(Value::as_text)
        .ok_or_else(|| CliError::Rule {
            index,
            reason: "missing \"kind\"".to_string(),
        })?;

    let mut rule = ValidationRule::new(names(map.get("fields")), kind);
    for scenario in names(map.get("on")) {
        rule = rule.on(scenario);
    }
    for (key, param) in map {
        if !RESERVED_KEYS.contains(&key.as_str()) {
            rule = rule.param(key.clone(), param.clone());
        }
    }
    Ok(rule)
}

fn names(value: Option<&Value>) -> Vec<String> {
    value
        .map(|v| value_to_list(v, ",", true))
        .unwrap_or_default()
        .iter()
        .map(Value::to_text)
        .collect()
}

/// Validates `entity` against `rules` under `scenario`.
pub fn validate(
    entity: &mut Entity,
    rules: Vec<ValidationRule>,
    scenario: &str,
    fields: &[String],
) -> Result<ValidateResult, CliError> {
    entity.set_rules(rules);
    entity.set_scenario(scenario);
    let only: Vec<&str> = fields.iter().map(String::as_str).collect();
    let filter = (!only.is_empty()).then_some(only.as_slice());

    let valid = entity.validate(filter, true, &BuiltinValidators)?;
    Ok(ValidateResult {
        valid,
        scenario: scenario.to_string(),
        errors: entity.errors().clone(),
    })
}

/// Runs the validate command.
pub fn run(
    path: &Path,
    class: Option<&str>,
    rules_path: &Path,
    scenario: &str,
    fields: &[String],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = parse_rules(&read_json(rules_path)?)?;
    let mut entity = load_record(path, class)?;

    let result = validate(&mut entity, rules, scenario, fields)?;
    info!(
        entity = entity.name(),
        scenario,
        failed_fields = result.errors.len(),
        "validated record"
    );

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    if result.valid {
        Ok(())
    } else {
        Err("Validation failed".into())
    }
}

fn print_text_output(result: &ValidateResult) {
    if result.valid {
        println!("✓ Record is valid");
        return;
    }
    println!("✗ {} field(s) failed:", result.errors.len());
    for (field, messages) in result.errors.all() {
        for message in messages {
            println!("  {}: {}", field, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(json: &str) -> Vec<ValidationRule> {
        parse_rules(&Value::from_json_str(json).unwrap()).unwrap()
    }

    #[test]
    fn parses_fields_scenarios_and_params() {
        let parsed = rules(
            r#"[{"kind": "number", "fields": "blog_id, forum_id", "on": ["publish"], "min": 1}]"#,
        );

        let rule = &parsed[0];
        assert_eq!(rule.kind(), "number");
        assert_eq!(rule.fields(), ["blog_id", "forum_id"]);
        assert_eq!(rule.scenarios(), ["publish"]);
        assert_eq!(rule.params().get("min"), Some(&Value::Integer(1)));
        assert_eq!(rule.params().len(), 1);
    }

    #[test]
    fn rejects_malformed_rules() {
        let err = parse_rules(&Value::from_json_str(r#"[{"fields": ["a"]}]"#).unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Rule { index: 0, .. }));

        let err = parse_rules(&Value::from_json_str(r#"{"kind": "required"}"#).unwrap());
        assert!(err.is_err());
    }

    #[test]
    fn validates_under_scenario() {
        let mut entity = Entity::new();
        entity.set("title", "");
        let parsed = rules(
            r#"[
                {"kind": "required", "fields": ["title"], "on": "publish"},
                {"kind": "string", "fields": ["title"], "max": 3}
            ]"#,
        );

        let draft = validate(&mut entity, parsed.clone(), "", &[]).unwrap();
        assert!(draft.valid);

        let publish = validate(&mut entity, parsed, "publish", &[]).unwrap();
        assert!(!publish.valid);
        assert_eq!(publish.errors.first(Some("title")), Some("title cannot be blank."));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let mut entity = Entity::new();

        let err = validate(&mut entity, rules(r#"[{"kind": "email", "fields": "a"}]"#), "", &[])
            .unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
    }
}
