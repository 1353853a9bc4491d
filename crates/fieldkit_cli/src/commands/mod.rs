//! CLI command implementations.

pub mod apply;
pub mod inspect;
pub mod validate;

use crate::error::CliError;
use fieldkit_core::Entity;
use fieldkit_value::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a JSON file into a [`Value`].
pub fn read_json(path: &Path) -> Result<Value, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Value::from_json_str(&text).map_err(|source| CliError::Value {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a record file into an entity.
///
/// The entity is named after `class` when given (which also sets its module
/// prefix), otherwise after the file stem.
pub fn load_record(path: &Path, class: Option<&str>) -> Result<Entity, CliError> {
    let Value::Map(data) = read_json(path)? else {
        return Err(CliError::Shape {
            path: path.to_path_buf(),
            expected: "a JSON object",
        });
    };
    let mut entity = match class {
        Some(class) => Entity::for_class(class),
        None => Entity::named(
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("record"),
        ),
    };
    entity.set_data(data);
    debug!(path = %path.display(), fields = entity.len(), "loaded record");
    Ok(entity)
}
