//! Tracked writes and the persistence-facing view of the log.

use super::Entity;
use crate::tracking::{FieldType, Snapshot, TrackingLog};
use fieldkit_value::Value;
use indexmap::IndexMap;
use tracing::trace;

impl Entity {
    pub(super) fn tracking_mut(&mut self) -> &mut TrackingLog {
        self.tracking.get_or_insert_with(TrackingLog::new)
    }

    /// Writes a snapshot's value and records it in the log.
    ///
    /// Returns the snapshot previously recorded for the field.
    pub fn set_tracked(&mut self, name: &str, snapshot: Snapshot) -> Option<Snapshot> {
        self.data.insert(name.to_string(), snapshot.to_value());
        self.tracking_mut().record_set(name, snapshot)
    }

    /// Removes a field and records the removal in the log.
    ///
    /// Returns the snapshot last recorded for the field.
    pub fn delete_tracked(&mut self, name: &str) -> Option<Snapshot> {
        self.data.shift_remove(name);
        self.tracking_mut().record_delete(name)
    }

    /// Reads a field written through the log. Same as [`get`](Self::get).
    pub fn get_tracked(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    /// Fields to write back, or only those whose value changed.
    pub fn pending_updates(&self, modified_only: bool) -> IndexMap<String, Snapshot> {
        self.tracking
            .as_ref()
            .map(|log| log.pending_updates(modified_only))
            .unwrap_or_default()
    }

    /// Fields to remove, with the last snapshot recorded for each.
    pub fn pending_deletes(&self) -> IndexMap<String, Option<Snapshot>> {
        self.tracking
            .as_ref()
            .map(|log| log.pending_deletes().clone())
            .unwrap_or_default()
    }

    /// Normalizes `value` for `field_type` and writes it through the log.
    ///
    /// - `Number` with a scalar: numbers and text that parses as a number
    ///   become `Float`; anything else is coerced with [`Value::to_int`].
    /// - `String` with a scalar: the text form, cut to
    ///   [`max_string_len`](crate::EntityConfig::max_string_len) characters.
    /// - Otherwise the value is stored untouched as `Text`.
    pub fn set_expanded(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        field_type: FieldType,
    ) -> Option<Snapshot> {
        let snapshot = self.normalize(value.into(), field_type);
        trace!(field = name, kind = %snapshot.field_type(), "tracked write");
        self.set_tracked(name, snapshot)
    }

    /// Removes a field through the log.
    pub fn delete_expanded(&mut self, name: &str) -> Option<Snapshot> {
        trace!(field = name, "tracked delete");
        self.delete_tracked(name)
    }

    /// The log, if anything was ever tracked.
    pub fn tracking(&self) -> Option<&TrackingLog> {
        self.tracking.as_ref()
    }

    /// Takes the log, leaving the entity with none.
    ///
    /// Called by the persistence layer after flushing, so that the next
    /// log only holds changes made since.
    pub fn take_tracking(&mut self) -> TrackingLog {
        self.tracking.take().unwrap_or_default()
    }

    /// Forgets everything tracked so far.
    pub fn clear_tracking(&mut self) {
        self.tracking = None;
    }

    fn normalize(&self, value: Value, field_type: FieldType) -> Snapshot {
        match field_type {
            FieldType::Number if value.is_scalar() => Snapshot::Number(to_number(&value)),
            FieldType::String if value.is_scalar() => {
                let text = value.to_text();
                let max = self.config.max_string_len;
                if text.chars().count() > max {
                    Snapshot::String(text.chars().take(max).collect())
                } else {
                    Snapshot::String(text)
                }
            }
            _ => Snapshot::Text(value),
        }
    }
}

fn to_number(value: &Value) -> Value {
    let parsed = match value {
        Value::Integer(_) | Value::Float(_) => value.as_float(),
        Value::Text(s) => Value::parse_number(s.trim())
            .ok()
            .and_then(|n| n.as_float()),
        _ => None,
    };
    match parsed.filter(|f| f.is_finite()) {
        Some(f) => Value::Float(f),
        None => Value::Integer(value.to_int()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityConfig;

    #[test]
    fn number_normalization() {
        let mut e = Entity::new();

        e.set_expanded("a", "42", FieldType::Number);
        e.set_expanded("b", "2.5", FieldType::Number);
        e.set_expanded("c", 3.0, FieldType::Number);
        e.set_expanded("d", "12abc", FieldType::Number);
        e.set_expanded("e", true, FieldType::Number);

        assert_eq!(e.get("a"), Some(&Value::Float(42.0)));
        assert_eq!(e.get("b"), Some(&Value::Float(2.5)));
        assert_eq!(e.get("c"), Some(&Value::Float(3.0)));
        assert_eq!(e.get("d"), Some(&Value::Integer(12)));
        assert_eq!(e.get("e"), Some(&Value::Integer(1)));
    }

    #[test]
    fn string_normalization_truncates_by_characters() {
        let mut e = Entity::new().with_config(EntityConfig::new().max_string_len(3));

        e.set_expanded("name", "абвгд", FieldType::String);
        e.set_expanded("count", 12345, FieldType::String);

        assert_eq!(e.get("name"), Some(&Value::from("абв")));
        assert_eq!(
            e.pending_updates(false).get("count"),
            Some(&Snapshot::String("123".into()))
        );
    }

    #[test]
    fn non_scalars_become_text() {
        let mut e = Entity::new();
        let list = Value::from(vec![1i64, 2]);

        e.set_expanded("tags", list.clone(), FieldType::Number);
        e.set_expanded("note", Value::Null, FieldType::String);

        let updates = e.pending_updates(false);
        assert_eq!(updates.get("tags"), Some(&Snapshot::Text(list)));
        assert_eq!(updates.get("note"), Some(&Snapshot::Text(Value::Null)));
    }

    #[test]
    fn modified_only_after_consuming_the_log() {
        let mut e = Entity::new();
        e.set_expanded("x", 1, FieldType::Number);
        e.set_expanded("y", "a", FieldType::String);

        let flushed = e.take_tracking();
        assert_eq!(flushed.set().len(), 2);
        assert!(e.tracking().is_none());

        e.set_expanded("x", 1, FieldType::Number);
        e.set_expanded("y", "b", FieldType::String);

        let updates = e.pending_updates(true);
        assert_eq!(updates.keys().collect::<Vec<_>>(), ["y"]);
        assert_eq!(e.pending_updates(false).len(), 2);
    }

    #[test]
    fn delete_then_set_again() {
        let mut e = Entity::new();
        e.set_expanded("x", 1, FieldType::Number);

        assert_eq!(
            e.delete_expanded("x"),
            Some(Snapshot::Number(Value::Float(1.0)))
        );
        assert!(!e.has("x"));
        assert!(e.pending_updates(false).is_empty());
        assert!(e.pending_deletes().contains_key("x"));

        e.set_expanded("x", 2, FieldType::Number);
        assert!(e.pending_deletes().is_empty());
        assert_eq!(e.get_tracked("x"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn tracked_write_is_not_double_recorded() {
        let mut e = Entity::new().with_config(EntityConfig::new().track_changes(true));

        e.set_tracked("x", Snapshot::Number(Value::Integer(1)));

        let log = e.tracking().unwrap();
        assert_eq!(log.set().len(), 1);
        assert_eq!(log.modified().get("x"), Some(&None));
    }

    #[test]
    fn clear_tracking_drops_log() {
        let mut e = Entity::new();
        e.set_expanded("x", 1, FieldType::Number);

        e.clear_tracking();

        assert!(e.pending_updates(false).is_empty());
        assert_eq!(e.get("x"), Some(&Value::Float(1.0)));
    }
}
