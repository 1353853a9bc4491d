//! Change-tracking log for partial persistence.
//!
//! The log records which fields were written or removed since it was last
//! consumed, so a persistence layer can issue an UPDATE touching only the
//! changed columns and a DELETE list for removed ones.
//!
//! Three maps are kept:
//! - `set`: field → latest [`Snapshot`] written
//! - `modified`: field → the snapshot it replaced, for fields whose value
//!   actually changed (`None` when there was none)
//! - `deleted`: field → the last snapshot before removal
//!
//! A field is never in `set` and `deleted` at the same time.

use fieldkit_value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared storage type of a tracked field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Numeric column.
    Number,
    /// Short text column.
    #[default]
    String,
    /// Free-form column holding any value.
    Text,
}

impl FieldType {
    /// The type's name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Text => "text",
        }
    }
}

impl From<&str> for FieldType {
    /// Unknown names fall back to `Text`.
    fn from(name: &str) -> Self {
        match name {
            "number" => FieldType::Number,
            "string" => FieldType::String,
            _ => FieldType::Text,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value as recorded in the tracking log.
///
/// Serializes as `{"type": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Snapshot {
    /// A number (`Integer` or `Float`).
    Number(Value),
    /// A bounded text value.
    String(String),
    /// Any value, stored as-is.
    Text(Value),
}

impl Snapshot {
    /// Picks a snapshot kind from the value's shape.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Integer(_) | Value::Float(_) => Snapshot::Number(value.clone()),
            Value::Text(s) => Snapshot::String(s.clone()),
            other => Snapshot::Text(other.clone()),
        }
    }

    /// The declared type of this snapshot.
    pub fn field_type(&self) -> FieldType {
        match self {
            Snapshot::Number(_) => FieldType::Number,
            Snapshot::String(_) => FieldType::String,
            Snapshot::Text(_) => FieldType::Text,
        }
    }

    /// The recorded value.
    pub fn to_value(&self) -> Value {
        match self {
            Snapshot::Number(v) | Snapshot::Text(v) => v.clone(),
            Snapshot::String(s) => Value::Text(s.clone()),
        }
    }

    /// Consumes the snapshot, returning the recorded value.
    pub fn into_value(self) -> Value {
        match self {
            Snapshot::Number(v) | Snapshot::Text(v) => v,
            Snapshot::String(s) => Value::Text(s),
        }
    }
}

/// The set/modified/deleted bookkeeping for one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingLog {
    set: IndexMap<String, Snapshot>,
    modified: IndexMap<String, Option<Snapshot>>,
    deleted: IndexMap<String, Option<Snapshot>>,
}

impl TrackingLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write and returns the snapshot it replaced.
    ///
    /// When the new snapshot differs from the previous one (a first write
    /// differs from "absent"), the previous one is kept under `modified`.
    pub fn record_set(&mut self, name: &str, snapshot: Snapshot) -> Option<Snapshot> {
        self.deleted.shift_remove(name);
        let changed = self.set.get(name) != Some(&snapshot);
        let previous = self.set.insert(name.to_string(), snapshot);
        if changed {
            self.modified.insert(name.to_string(), previous.clone());
        }
        previous
    }

    /// Records a removal and returns the last snapshot written.
    pub fn record_delete(&mut self, name: &str) -> Option<Snapshot> {
        let previous = self.set.shift_remove(name);
        self.deleted.insert(name.to_string(), previous.clone());
        previous
    }

    /// Fields written since the log was last consumed.
    ///
    /// With `modified_only`, only fields whose value actually changed.
    pub fn pending_updates(&self, modified_only: bool) -> IndexMap<String, Snapshot> {
        self.set
            .iter()
            .filter(|(name, _)| !modified_only || self.modified.contains_key(name.as_str()))
            .map(|(name, snapshot)| (name.clone(), snapshot.clone()))
            .collect()
    }

    /// Fields removed since the log was last consumed.
    pub fn pending_deletes(&self) -> &IndexMap<String, Option<Snapshot>> {
        &self.deleted
    }

    /// Latest snapshots written.
    pub fn set(&self) -> &IndexMap<String, Snapshot> {
        &self.set
    }

    /// Prior snapshots of fields whose value changed.
    pub fn modified(&self) -> &IndexMap<String, Option<Snapshot>> {
        &self.modified
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Forgets everything recorded.
    pub fn clear(&mut self) {
        self.set.clear();
        self.modified.clear();
        self.deleted.clear();
    }
}
