//! Built-in validators.
//!
//! | kind | params |
//! |---|---|
//! | `required` | |
//! | `string` | `min`, `max` (characters) |
//! | `number` | `min`, `max`, `integer_only` |
//! | `boolean` | |
//! | `inlist` | `range` (list, required), `strict` |
//!
//! Every kind accepts `message` (with `{field}` and, where relevant,
//! `{min}` / `{max}` placeholders) and `allow_empty` (default true, except
//! for `required`).

use super::{ValidationErrors, ValidationRule, Validator, ValidatorFactory};
use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use fieldkit_value::Value;

/// Factory for the built-in validator kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinValidators;

impl ValidatorFactory for BuiltinValidators {
    fn create(&self, rule: &ValidationRule) -> CoreResult<Box<dyn Validator>> {
        let kind = rule.kind();
        let base = Bound::from_rule(rule);
        let validator: Box<dyn Validator> = match kind {
            "required" => Box::new(Required { base }),
            "string" => Box::new(StringLength {
                min: usize_param(rule, "min")?,
                max: usize_param(rule, "max")?,
                base,
            }),
            "number" => Box::new(Number {
                min: number_param(rule, "min")?,
                max: number_param(rule, "max")?,
                integer_only: rule
                    .params()
                    .get("integer_only")
                    .is_some_and(Value::is_truthy),
                base,
            }),
            "boolean" => Box::new(Boolean { base }),
            "inlist" => {
                let range = match rule.params().get("range") {
                    Some(Value::List(items)) => items.clone(),
                    Some(other) => {
                        return Err(CoreError::invalid_param(
                            kind,
                            "range",
                            format!("expected a list, found {}", other.type_name()),
                        ))
                    }
                    None => return Err(CoreError::invalid_param(kind, "range", "missing")),
                };
                Box::new(InList {
                    range,
                    strict: rule.params().get("strict").is_some_and(Value::is_truthy),
                    base,
                })
            }
            other => return Err(CoreError::unknown_validator(other)),
        };
        Ok(validator)
    }
}

/// State shared by every built-in validator.
#[derive(Debug, Clone)]
struct Bound {
    fields: Vec<String>,
    scenarios: Vec<String>,
    message: Option<String>,
    allow_empty: bool,
}

impl Bound {
    fn from_rule(rule: &ValidationRule) -> Self {
        let params = rule.params();
        Self {
            fields: rule.fields().to_vec(),
            scenarios: rule.scenarios().to_vec(),
            message: params.get("message").map(Value::to_text),
            allow_empty: params
                .get("allow_empty")
                .map_or(rule.kind() != "required", Value::is_truthy),
        }
    }

    /// Renders the custom message, or `default`, for `field`.
    fn report(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        default: &str,
        vars: &[(&str, String)],
    ) {
        let template = self.message.as_deref().unwrap_or(default);
        let mut message = template.replace("{field}", field);
        for (name, value) in vars {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        errors.add(field, message);
    }

    /// Returns true if the field is blank and blanks are allowed.
    fn skip(&self, value: Option<&Value>) -> bool {
        self.allow_empty && is_blank(value)
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.trim().is_empty(),
        Some(Value::List(items)) => items.is_empty(),
        Some(Value::Map(m)) => m.is_empty(),
        Some(_) => false,
    }
}

fn usize_param(rule: &ValidationRule, name: &str) -> CoreResult<Option<usize>> {
    match rule.params().get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Integer(n)) => usize::try_from(*n)
            .map(Some)
            .map_err(|_| CoreError::invalid_param(rule.kind(), name, "must not be negative")),
        Some(other) => Err(CoreError::invalid_param(
            rule.kind(),
            name,
            format!("expected an integer, found {}", other.type_name()),
        )),
    }
}

fn number_param(rule: &ValidationRule, name: &str) -> CoreResult<Option<f64>> {
    match rule.params().get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_float().map(Some).ok_or_else(|| {
            CoreError::invalid_param(
                rule.kind(),
                name,
                format!("expected a number, found {}", value.type_name()),
            )
        }),
    }
}

fn format_bound(n: f64) -> String {
    Value::Float(n).to_text()
}

#[derive(Debug)]
struct Required {
    base: Bound,
}

impl Validator for Required {
    fn fields(&self) -> &[String] {
        &self.base.fields
    }

    fn scenarios(&self) -> &[String] {
        &self.base.scenarios
    }

    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors) {
        if is_blank(entity.get(field)) {
            self.base
                .report(errors, field, "{field} cannot be blank.", &[]);
        }
    }
}

#[derive(Debug)]
struct StringLength {
    base: Bound,
    min: Option<usize>,
    max: Option<usize>,
}

impl Validator for StringLength {
    fn fields(&self) -> &[String] {
        &self.base.fields
    }

    fn scenarios(&self) -> &[String] {
        &self.base.scenarios
    }

    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors) {
        let value = entity.get(field);
        if self.base.skip(value) {
            return;
        }
        let text = match value {
            Some(v @ (Value::Text(_) | Value::Integer(_) | Value::Float(_))) => v.to_text(),
            _ => {
                self.base
                    .report(errors, field, "{field} must be a string.", &[]);
                return;
            }
        };
        let len = text.chars().count();
        if let Some(min) = self.min.filter(|min| len < *min) {
            self.base.report(
                errors,
                field,
                "{field} is too short (minimum is {min} characters).",
                &[("min", min.to_string())],
            );
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            self.base.report(
                errors,
                field,
                "{field} is too long (maximum is {max} characters).",
                &[("max", max.to_string())],
            );
        }
    }
}

#[derive(Debug)]
struct Number {
    base: Bound,
    min: Option<f64>,
    max: Option<f64>,
    integer_only: bool,
}

impl Validator for Number {
    fn fields(&self) -> &[String] {
        &self.base.fields
    }

    fn scenarios(&self) -> &[String] {
        &self.base.scenarios
    }

    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors) {
        let value = entity.get(field);
        if self.base.skip(value) {
            return;
        }
        let number = match value {
            Some(Value::Integer(n)) => *n as f64,
            Some(Value::Float(f)) => *f,
            Some(Value::Text(s)) => match Value::parse_number(s) {
                Ok(parsed) => parsed.to_float(),
                Err(_) => {
                    self.base
                        .report(errors, field, "{field} must be a number.", &[]);
                    return;
                }
            },
            _ => {
                self.base
                    .report(errors, field, "{field} must be a number.", &[]);
                return;
            }
        };
        if self.integer_only && number.fract() != 0.0 {
            self.base
                .report(errors, field, "{field} must be an integer.", &[]);
            return;
        }
        if let Some(min) = self.min.filter(|min| number < *min) {
            self.base.report(
                errors,
                field,
                "{field} is too small (minimum is {min}).",
                &[("min", format_bound(min))],
            );
        }
        if let Some(max) = self.max.filter(|max| number > *max) {
            self.base.report(
                errors,
                field,
                "{field} is too big (maximum is {max}).",
                &[("max", format_bound(max))],
            );
        }
    }
}

#[derive(Debug)]
struct Boolean {
    base: Bound,
}

impl Validator for Boolean {
    fn fields(&self) -> &[String] {
        &self.base.fields
    }

    fn scenarios(&self) -> &[String] {
        &self.base.scenarios
    }

    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors) {
        let value = entity.get(field);
        if self.base.skip(value) {
            return;
        }
        let ok = match value {
            Some(Value::Bool(_)) => true,
            Some(Value::Integer(n)) => *n == 0 || *n == 1,
            Some(Value::Text(s)) => matches!(s.as_str(), "0" | "1" | "true" | "false"),
            _ => false,
        };
        if !ok {
            self.base.report(
                errors,
                field,
                "{field} must be either true or false.",
                &[],
            );
        }
    }
}

#[derive(Debug)]
struct InList {
    base: Bound,
    range: Vec<Value>,
    strict: bool,
}

impl Validator for InList {
    fn fields(&self) -> &[String] {
        &self.base.fields
    }

    fn scenarios(&self) -> &[String] {
        &self.base.scenarios
    }

    fn validate_field(&self, entity: &Entity, field: &str, errors: &mut ValidationErrors) {
        let value = entity.get(field);
        if self.base.skip(value) {
            return;
        }
        let value = value.cloned().unwrap_or_default();
        let found = if self.strict {
            self.range.contains(&value)
        } else {
            let text = value.to_text();
            self.range.iter().any(|item| item.to_text() == text)
        };
        if !found {
            self.base
                .report(errors, field, "{field} is not in the list.", &[]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit_value::Map;

    fn entity(pairs: Vec<(&str, Value)>) -> Entity {
        Entity::from_data(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect::<Map>())
    }

    fn run(rule: ValidationRule, entity: &Entity) -> ValidationErrors {
        let validator = BuiltinValidators.create(&rule).unwrap();
        let mut errors = ValidationErrors::new();
        validator.validate(entity, None, &mut errors);
        errors
    }

    #[test]
    fn required_rejects_blank_values() {
        let e = entity(vec![
            ("title", Value::from("  ")),
            ("text", Value::from("body")),
            ("tags", Value::List(vec![])),
        ]);

        let errors = run(
            ValidationRule::new(["title", "text", "tags", "blog_id"], "required"),
            &e,
        );

        assert_eq!(errors.for_field("title"), ["title cannot be blank."]);
        assert!(!errors.has(Some("text")));
        assert!(errors.has(Some("tags")));
        assert!(errors.has(Some("blog_id")));
    }

    #[test]
    fn string_length_bounds() {
        let e = entity(vec![
            ("short", Value::from("ab")),
            ("long", Value::from("abcdefgh")),
            ("ok", Value::from("abcd")),
            ("empty", Value::from("")),
            ("list", Value::from(vec![1i64])),
        ]);

        let errors = run(
            ValidationRule::new(["short", "long", "ok", "empty", "list"], "string")
                .param("min", 3)
                .param("max", 5),
            &e,
        );

        assert_eq!(
            errors.for_field("short"),
            ["short is too short (minimum is 3 characters)."]
        );
        assert_eq!(
            errors.for_field("long"),
            ["long is too long (maximum is 5 characters)."]
        );
        assert!(!errors.has(Some("ok")));
        assert!(!errors.has(Some("empty")));
        assert_eq!(errors.for_field("list"), ["list must be a string."]);
    }

    #[test]
    fn string_length_counts_characters() {
        let e = entity(vec![("name", Value::from("жёлтый"))]);

        let errors = run(ValidationRule::new(["name"], "string").param("max", 6), &e);

        assert!(errors.is_empty());
    }

    #[test]
    fn number_checks() {
        let e = entity(vec![
            ("a", Value::from("12")),
            ("b", Value::from("x")),
            ("c", Value::Float(2.5)),
            ("d", Value::Integer(-1)),
            ("e", Value::Integer(100)),
        ]);

        let errors = run(
            ValidationRule::new(["a", "b", "c", "d", "e"], "number")
                .param("min", 0)
                .param("max", 50)
                .param("integer_only", true),
            &e,
        );

        assert!(!errors.has(Some("a")));
        assert_eq!(errors.for_field("b"), ["b must be a number."]);
        assert_eq!(errors.for_field("c"), ["c must be an integer."]);
        assert_eq!(errors.for_field("d"), ["d is too small (minimum is 0)."]);
        assert_eq!(errors.for_field("e"), ["e is too big (maximum is 50)."]);
    }

    #[test]
    fn boolean_accepts_flags() {
        let e = entity(vec![
            ("a", Value::Bool(false)),
            ("b", Value::Integer(1)),
            ("c", Value::from("true")),
            ("d", Value::Integer(2)),
        ]);

        let errors = run(ValidationRule::new(["a", "b", "c", "d"], "boolean"), &e);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first(None), Some("d must be either true or false."));
    }

    #[test]
    fn inlist_loose_and_strict() {
        let e = entity(vec![("status", Value::Integer(1))]);
        let range = Value::from(vec!["1", "2"]);

        let loose = run(
            ValidationRule::new(["status"], "inlist").param("range", range.clone()),
            &e,
        );
        assert!(loose.is_empty());

        let strict = run(
            ValidationRule::new(["status"], "inlist")
                .param("range", range)
                .param("strict", true),
            &e,
        );
        assert_eq!(strict.for_field("status"), ["status is not in the list."]);
    }

    #[test]
    fn custom_message_and_allow_empty() {
        let e = entity(vec![("title", Value::from(""))]);

        let errors = run(
            ValidationRule::new(["title"], "string")
                .param("min", 2)
                .param("allow_empty", false)
                .param("message", "Please fill in {field} ({min}+)"),
            &e,
        );

        assert_eq!(errors.for_field("title"), ["Please fill in title (2+)"]);
    }

    #[test]
    fn validate_honors_field_filter() {
        let e = entity(vec![]);
        let validator = BuiltinValidators
            .create(&ValidationRule::new(["a", "b"], "required"))
            .unwrap();
        let mut errors = ValidationErrors::new();

        validator.validate(&e, Some(&["b".to_string()]), &mut errors);

        assert!(!errors.has(Some("a")));
        assert!(errors.has(Some("b")));
    }

    #[test]
    fn factory_rejects_bad_rules() {
        let unknown = BuiltinValidators.create(&ValidationRule::new(["a"], "regexp"));
        assert_eq!(unknown.unwrap_err(), CoreError::unknown_validator("regexp"));

        let no_range = BuiltinValidators.create(&ValidationRule::new(["a"], "inlist"));
        assert!(matches!(no_range, Err(CoreError::InvalidParam { .. })));

        let bad_min =
            BuiltinValidators.create(&ValidationRule::new(["a"], "string").param("min", "x"));
        assert!(matches!(bad_min, Err(CoreError::InvalidParam { .. })));
    }
}
