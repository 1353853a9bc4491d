//! Inspect command implementation.

use super::load_record;
use fieldkit_arrays::keys_recursive;
use fieldkit_core::{accessor, Entity, StaticLocalizer};
use fieldkit_value::Value;
use serde::Serialize;
use std::path::Path;

/// A localized field to resolve while inspecting.
#[derive(Debug, Clone)]
pub struct Localized {
    /// Base field name.
    pub field: String,
    /// Requested language.
    pub lang: String,
    /// Site default language.
    pub default_lang: String,
}

/// Record inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Entity name.
    pub name: String,
    /// Module prefix, if derived from the class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_prefix: Option<String>,
    /// Primary key field name.
    pub primary_key: String,
    /// Primary key value, `null` when unset.
    pub primary_key_value: Value,
    /// Top-level fields.
    pub fields: Vec<FieldInfo>,
    /// Dotted paths of every nested value.
    pub paths: Vec<String>,
    /// Resolved localized value, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized: Option<Value>,
}

/// Description of one field.
#[derive(Debug, Serialize)]
pub struct FieldInfo {
    /// Field name.
    pub name: String,
    /// Value type.
    pub kind: &'static str,
    /// Getter that reads it.
    pub getter: String,
}

/// Describes `entity`.
pub fn inspect(entity: &Entity, localized: Option<&Localized>) -> InspectResult {
    let fields = entity
        .data()
        .iter()
        .map(|(name, value)| FieldInfo {
            name: name.clone(),
            kind: value.type_name(),
            getter: accessor::getter_name(name),
        })
        .collect();
    let localized = localized.map(|l| {
        let localizer = StaticLocalizer::new(l.lang.as_str(), l.default_lang.as_str());
        entity.get_localized(&l.field, Value::Null, None, &localizer)
    });
    InspectResult {
        name: entity.name().to_string(),
        module_prefix: entity.module_prefix().map(str::to_string),
        primary_key: entity.primary_key().to_string(),
        primary_key_value: entity.primary_key_value().cloned().unwrap_or_default(),
        fields,
        paths: keys_recursive(entity.data()),
        localized,
    }
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    class: Option<&str>,
    localized: Option<&Localized>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let entity = load_record(path, class)?;
    let result = inspect(&entity, localized);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Entity: {}", result.name);
    if let Some(prefix) = &result.module_prefix {
        println!("Module prefix: {}", prefix);
    }
    println!(
        "Primary key: {} = {}",
        result.primary_key,
        result.primary_key_value.to_json_string()
    );
    println!();
    println!("Fields ({}):", result.fields.len());
    for field in &result.fields {
        println!("  {:<24} {:<8} {}", field.name, field.kind, field.getter);
    }
    if let Some(value) = &result.localized {
        println!();
        println!("Localized: {}", value.to_json_string());
    }
}
