//! Entity configuration.

/// Default maximum length, in characters, of a tracked `string` field.
pub const DEFAULT_MAX_STRING_LEN: usize = 250;

/// Configuration shared by entities of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    /// Name of the field holding the entity's identity.
    pub primary_key: String,

    /// Maximum length of values tracked with [`FieldType::String`](crate::FieldType::String).
    pub max_string_len: usize,

    /// Languages tried, in order, after the requested and the default
    /// language when reading a localized field.
    pub fallback_languages: Vec<String>,

    /// Whether plain `set`/`delete` calls are mirrored into the tracking log.
    pub track_changes: bool,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            primary_key: "id".to_string(),
            max_string_len: DEFAULT_MAX_STRING_LEN,
            fallback_languages: vec!["en".to_string(), "ru".to_string()],
            track_changes: false,
        }
    }
}

impl EntityConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary key field name.
    #[must_use]
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    /// Sets the maximum tracked string length.
    #[must_use]
    pub const fn max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    /// Replaces the fallback language chain.
    #[must_use]
    pub fn fallback_languages<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_languages = langs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether plain writes are tracked.
    #[must_use]
    pub const fn track_changes(mut self, value: bool) -> Self {
        self.track_changes = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EntityConfig::default();
        assert_eq!(config.primary_key, "id");
        assert_eq!(config.max_string_len, 250);
        assert_eq!(config.fallback_languages, vec!["en", "ru"]);
        assert!(!config.track_changes);
    }

    #[test]
    fn builder_pattern() {
        let config = EntityConfig::new()
            .primary_key("topic_id")
            .max_string_len(16)
            .fallback_languages(["de"])
            .track_changes(true);

        assert_eq!(config.primary_key, "topic_id");
        assert_eq!(config.max_string_len, 16);
        assert_eq!(config.fallback_languages, vec!["de"]);
        assert!(config.track_changes);
    }
}
