//! Typed wrappers around [`Entity`].

use crate::config::EntityConfig;
use crate::entity::Entity;
use crate::validation::ValidationRule;
use fieldkit_value::Map;

/// A typed record backed by an [`Entity`].
///
/// Implementors supply the class-like name, the validation rules and the
/// conversions to and from the underlying entity; typed accessors are then
/// plain methods reading through [`entity`](Model::entity).
///
/// # Example
///
/// ```
/// use fieldkit_core::{Entity, Model, ValidationRule};
/// use fieldkit_value::{Map, Value};
///
/// struct Blog(Entity);
///
/// impl Model for Blog {
///     const NAME: &'static str = "ModuleBlog_EntityBlog";
///
///     fn rules() -> Vec<ValidationRule> {
///         vec![ValidationRule::new(["title"], "required")]
///     }
///
///     fn from_entity(entity: Entity) -> Self {
///         Blog(entity)
///     }
///
///     fn entity(&self) -> &Entity {
///         &self.0
///     }
///
///     fn entity_mut(&mut self) -> &mut Entity {
///         &mut self.0
///     }
///
///     fn into_entity(self) -> Entity {
///         self.0
///     }
/// }
///
/// impl Blog {
///     fn title(&self) -> String {
///         self.entity().get_or("title", "").to_text()
///     }
/// }
///
/// let mut data = Map::new();
/// data.insert("title".into(), Value::from("News"));
/// let blog = Blog::build(data);
/// assert_eq!(blog.title(), "News");
/// assert_eq!(blog.entity().module_prefix(), Some("blog"));
/// ```
pub trait Model: Sized {
    /// Class-like name, from which the module prefix is derived.
    const NAME: &'static str;

    /// Validation rules for every instance.
    fn rules() -> Vec<ValidationRule> {
        Vec::new()
    }

    /// Configuration for every instance.
    fn config() -> EntityConfig {
        EntityConfig::default()
    }

    /// Wraps an entity.
    fn from_entity(entity: Entity) -> Self;

    /// The underlying entity.
    fn entity(&self) -> &Entity;

    /// The underlying entity, mutably.
    fn entity_mut(&mut self) -> &mut Entity;

    /// Unwraps the entity.
    fn into_entity(self) -> Entity;

    /// Builds an instance pre-populated with `data`.
    ///
    /// The initial data is loaded before the configuration is applied, so
    /// it never shows up in the tracking log.
    fn build(data: Map) -> Self {
        let mut entity = Entity::for_class(Self::NAME);
        entity.set_data(data);
        entity.set_rules(Self::rules());
        Self::from_entity(entity.with_config(Self::config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit_value::Value;

    struct Comment(Entity);

    impl Model for Comment {
        const NAME: &'static str = "ModuleComment_EntityComment";

        fn rules() -> Vec<ValidationRule> {
            vec![ValidationRule::new(["text"], "required")]
        }

        fn config() -> EntityConfig {
            EntityConfig::new().track_changes(true)
        }

        fn from_entity(entity: Entity) -> Self {
            Comment(entity)
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

    #[test]
    fn build_loads_data_untracked() {
        let mut data = Map::new();
        data.insert("text".into(), Value::from("hi"));

        let mut comment = Comment::build(data);

        assert_eq!(comment.entity().rules().len(), 1);
        assert!(comment.entity().pending_updates(false).is_empty());

        comment.entity_mut().set("text", "edited");
        assert_eq!(comment.entity().pending_updates(true).len(), 1);
        assert_eq!(comment.into_entity().name(), "ModuleComment_EntityComment");
    }
}
