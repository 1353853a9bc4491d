//! Per-field validation error collection.

use indexmap::IndexMap;
use serde::Serialize;

/// Validation messages grouped by field, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    by_field: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.by_field
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns true if there are errors for `field`, or any errors at all
    /// when `field` is `None`.
    pub fn has(&self, field: Option<&str>) -> bool {
        match field {
            Some(field) => self.by_field.contains_key(field),
            None => !self.by_field.is_empty(),
        }
    }

    /// Messages for one field.
    pub fn for_field(&self, field: &str) -> &[String] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// All messages, by field.
    pub fn all(&self) -> &IndexMap<String, Vec<String>> {
        &self.by_field
    }

    /// The first message for `field`, or the first message overall.
    pub fn first(&self, field: Option<&str>) -> Option<&str> {
        match field {
            Some(field) => self.by_field.get(field)?.first().map(String::as_str),
            None => self
                .by_field
                .values()
                .find_map(|messages| messages.first())
                .map(String::as_str),
        }
    }

    /// Drops the messages for `field`, or every message when `None`.
    pub fn clear(&mut self, field: Option<&str>) {
        match field {
            Some(field) => {
                self.by_field.shift_remove(field);
            }
            None => self.by_field.clear(),
        }
    }

    /// Returns true if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.by_field.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_query() {
        let mut errors = ValidationErrors::new();
        assert!(!errors.has(None));

        errors.add("title", "too short");
        errors.add("title", "bad characters");
        errors.add("text", "required");

        assert!(errors.has(None));
        assert!(errors.has(Some("title")));
        assert!(!errors.has(Some("blog_id")));
        assert_eq!(errors.for_field("title"), ["too short", "bad characters"]);
        assert!(errors.for_field("blog_id").is_empty());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn first_messages() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.first(None), None);

        errors.add("title", "too short");
        errors.add("text", "required");

        assert_eq!(errors.first(None), Some("too short"));
        assert_eq!(errors.first(Some("text")), Some("required"));
        assert_eq!(errors.first(Some("missing")), None);
    }

    #[test]
    fn partial_and_full_clear() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "too short");
        errors.add("text", "required");

        errors.clear(Some("title"));
        assert!(!errors.has(Some("title")));
        assert!(errors.has(None));

        errors.clear(None);
        assert!(errors.is_empty());
    }
}
