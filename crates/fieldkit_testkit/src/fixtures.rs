//! Test fixtures.
//!
//! A typed `Topic` model with a realistic rule set, plus helpers for the
//! entities most tests start from.

use fieldkit_core::{Entity, EntityConfig, Model, StaticLocalizer, ValidationRule};
use fieldkit_value::{Map, Value};

/// Class-like name of the topic fixture.
pub const TOPIC_CLASS: &str = "ModuleTopic_EntityTopic";

/// A blog topic, the canonical fixture model.
///
/// Fields: `id`, `blog_id`, `title`, `text`, `topic_type`, `votes_up`,
/// `votes_down`, `flags`, plus `topic_rating` reachable as `getRating`.
#[derive(Debug, Clone)]
pub struct Topic(Entity);

impl Model for Topic {
    const NAME: &'static str = TOPIC_CLASS;

    fn rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::new(["title", "text"], "required"),
            ValidationRule::new(["title"], "string")
                .param("min", 2)
                .param("max", 200),
            ValidationRule::new(["topic_type"], "inlist")
                .param("range", Value::from(vec!["topic", "link", "question"])),
            ValidationRule::new(["blog_id"], "number")
                .param("integer_only", true)
                .param("min", 1)
                .on("publish"),
            ValidationRule::new(["blog_id"], "required").on("publish"),
        ]
    }

    fn config() -> EntityConfig {
        EntityConfig::new().track_changes(true)
    }

    fn from_entity(entity: Entity) -> Self {
        Topic(entity.with_computed("vote_total", vote_total))
    }

    fn entity(&self) -> &Entity {
        &self.0
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.0
    }

    fn into_entity(self) -> Entity {
        self.0
    }
}

fn vote_total(entity: &Entity) -> Value {
    Value::Integer(entity.get_bitmask("votes_up", None) - entity.get_bitmask("votes_down", None))
}

impl Topic {
    /// The primary key value, 0 when unsaved.
    pub fn id(&self) -> i64 {
        self.0.primary_key_value().map_or(0, Value::to_int)
    }

    /// The title, empty when unset.
    pub fn title(&self) -> String {
        self.0.get_or("title", "").to_text()
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.0.set("title", title.into());
    }

    /// The body text, empty when unset.
    pub fn text(&self) -> String {
        self.0.get_or("text", "").to_text()
    }

    /// Net votes, from the computed getter.
    pub fn vote_total(&self) -> i64 {
        self.0.get_via("getVoteTotal").map_or(0, |v| v.to_int())
    }

    /// The rating, stored under the module prefix.
    pub fn rating(&self) -> f64 {
        self.0.get_via("getRating").map_or(0.0, |v| v.to_float())
    }
}

/// Field data for [`sample_topic`].
pub fn sample_data() -> Map {
    [
        ("id", Value::Integer(42)),
        ("blog_id", Value::Integer(3)),
        ("title", Value::from("Rust entities")),
        ("text", Value::from("A property bag with change tracking.")),
        ("topic_type", Value::from("topic")),
        ("votes_up", Value::Integer(10)),
        ("votes_down", Value::Integer(4)),
        ("flags", Value::Integer(0b0101)),
        ("topic_rating", Value::Float(7.5)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// A valid, untracked topic built from [`sample_data`].
pub fn sample_topic() -> Topic {
    Topic::build(sample_data())
}

/// A plain entity holding [`sample_data`].
pub fn sample_entity() -> Entity {
    Entity::from_data(sample_data())
}

/// An empty entity that mirrors plain writes into its tracking log.
pub fn tracked_entity() -> Entity {
    Entity::named("Tracked").with_config(EntityConfig::new().track_changes(true))
}

/// Localizer with current language `de` and default language `fr`, so
/// every tier of a localized lookup is distinguishable.
pub fn fixed_localizer() -> StaticLocalizer {
    StaticLocalizer::new("de", "fr")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit_core::BuiltinValidators;

    #[test]
    fn sample_topic_is_valid() {
        let mut topic = sample_topic();
        topic.entity_mut().set_scenario("publish");

        let valid = topic
            .entity_mut()
            .validate(None, true, &BuiltinValidators)
            .unwrap();

        assert!(valid, "{:?}", topic.entity().errors());
    }

    #[test]
    fn typed_accessors() {
        let topic = sample_topic();

        assert_eq!(topic.id(), 42);
        assert_eq!(topic.vote_total(), 6);
        assert_eq!(topic.rating(), 7.5);
        assert_eq!(topic.entity().module_prefix(), Some("topic"));
    }

    #[test]
    fn edits_are_tracked() {
        let mut topic = sample_topic();
        assert!(topic.entity().pending_updates(false).is_empty());

        topic.set_title("Renamed");

        let updates = topic.entity().pending_updates(true);
        assert_eq!(updates.keys().collect::<Vec<_>>(), ["title"]);
    }

    #[test]
    fn tracked_entity_records_plain_writes() {
        let mut entity = tracked_entity();
        entity.set("x", 1);

        assert_eq!(entity.pending_updates(false).len(), 1);
    }
}
