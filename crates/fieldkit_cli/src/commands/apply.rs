//! Apply command implementation.

use super::load_record;
use crate::error::CliError;
use fieldkit_core::{Entity, FieldType, Snapshot};
use fieldkit_value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// One `--set` argument: `name=value` or `name:type=value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Field name.
    pub name: String,
    /// Declared type; `string` when omitted.
    pub field_type: FieldType,
    /// Raw value. For `text` fields JSON input is decoded.
    pub value: Value,
}

impl FromStr for Assignment {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, raw) = s
            .split_once('=')
            .ok_or_else(|| CliError::Assignment(s.to_string()))?;
        let (name, field_type) = match lhs.split_once(':') {
            Some((name, kind)) => (name, FieldType::from(kind)),
            None => (lhs, FieldType::String),
        };
        if name.is_empty() {
            return Err(CliError::Assignment(s.to_string()));
        }
        let value = match field_type {
            FieldType::Text => Value::from_json_str(raw).unwrap_or_else(|_| Value::from(raw)),
            _ => Value::from(raw),
        };
        Ok(Self {
            name: name.to_string(),
            field_type,
            value,
        })
    }
}

/// The write-back sets produced by an edit.
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    /// Fields to update.
    pub updates: IndexMap<String, Snapshot>,
    /// Fields to delete, with their last tracked snapshot.
    pub deletes: IndexMap<String, Option<Snapshot>>,
}

/// Applies tracked edits to `entity`, writes first, then removals.
pub fn apply(
    entity: &mut Entity,
    assignments: &[Assignment],
    deletes: &[String],
    modified_only: bool,
) -> ApplyResult {
    for assignment in assignments {
        entity.set_expanded(
            &assignment.name,
            assignment.value.clone(),
            assignment.field_type,
        );
    }
    for name in deletes {
        entity.delete_expanded(name);
    }
    ApplyResult {
        updates: entity.pending_updates(modified_only),
        deletes: entity.pending_deletes(),
    }
}

/// Runs the apply command.
pub fn run(
    path: &Path,
    class: Option<&str>,
    sets: &[String],
    deletes: &[String],
    modified_only: bool,
    output: Option<&Path>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let assignments = sets
        .iter()
        .map(|s| s.parse::<Assignment>())
        .collect::<Result<Vec<_>, _>>()?;
    let mut entity = load_record(path, class)?;

    let result = apply(&mut entity, &assignments, deletes, modified_only);
    info!(
        entity = entity.name(),
        updates = result.updates.len(),
        deletes = result.deletes.len(),
        "applied edits"
    );

    if let Some(output) = output {
        let record = Value::Map(entity.to_data_map()).to_json_pretty();
        fs::write(output, record + "\n").map_err(|source| CliError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        info!(path = %output.display(), "wrote record");
    }

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

fn print_text_output(result: &ApplyResult) {
    println!("Updates ({}):", result.updates.len());
    for (name, snapshot) in &result.updates {
        println!(
            "  {:<24} {:<8} {}",
            name,
            snapshot.field_type(),
            snapshot.to_value().to_json_string()
        );
    }
    println!("Deletes ({}):", result.deletes.len());
    for (name, last) in &result.deletes {
        match last {
            Some(snapshot) => println!(
                "  {:<24} (was {} {})",
                name,
                snapshot.field_type(),
                snapshot.to_value().to_json_string()
            ),
            None => println!("  {}", name),
        }
    }
}
