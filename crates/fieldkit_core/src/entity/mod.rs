//! The entity property bag.
//!
//! An [`Entity`] is an ordered map of named [`Value`]s with the behavior a
//! CMS record needs around it: localized and bitmask reads, method-style
//! accessor dispatch, a change-tracking log and rule-driven validation.
//! Each concern lives in its own submodule as an `impl Entity` block.

mod dispatch;
mod tracked;
mod validate;

pub use dispatch::{Getter, ModuleResolver, Modules, NoModules};

use crate::accessor;
use crate::bitmask::Mask;
use crate::config::EntityConfig;
use crate::lang::{localized_key, Localizer};
use crate::tracking::{Snapshot, TrackingLog};
use crate::validation::{ValidationErrors, ValidationRule};
use fieldkit_value::{Map, Value};
use indexmap::IndexMap;

/// Default name for entities created without one.
const DEFAULT_NAME: &str = "Entity";

/// A named bag of field values.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    data: Map,
    module_prefix: Option<String>,
    primary_key: Option<String>,
    rules: Vec<ValidationRule>,
    errors: ValidationErrors,
    scenario: String,
    tracking: Option<TrackingLog>,
    computed: IndexMap<String, Getter>,
    config: EntityConfig,
}

impl Default for Entity {
    fn default() -> Self {
        Self::named(DEFAULT_NAME)
    }
}

impl Entity {
    /// Creates an empty entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty entity with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Map::new(),
            module_prefix: None,
            primary_key: None,
            rules: Vec::new(),
            errors: ValidationErrors::new(),
            scenario: String::new(),
            tracking: None,
            computed: IndexMap::new(),
            config: EntityConfig::default(),
        }
    }

    /// Creates an entity named after a class-like name, deriving its
    /// module prefix (`ModuleTopic_EntityTopic` → `topic`).
    pub fn for_class(class_name: &str) -> Self {
        let mut entity = Self::named(class_name);
        entity.module_prefix = accessor::module_prefix(class_name);
        entity
    }

    /// Creates an entity pre-populated with `data`.
    pub fn from_data(data: Map) -> Self {
        let mut entity = Self::new();
        entity.set_data(data);
        entity
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EntityConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the prefix tried by [`get_via`](Self::get_via) after the bare
    /// field name.
    #[must_use]
    pub fn with_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = Some(prefix.into());
        self
    }

    /// Overrides the primary key field name for this entity.
    #[must_use]
    pub fn with_primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    /// The entity's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module prefix, if any.
    pub fn module_prefix(&self) -> Option<&str> {
        self.module_prefix.as_deref()
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    // ========== bag ==========

    /// Writes a field, returning the value it replaced.
    ///
    /// With [`EntityConfig::track_changes`] on, the write is also recorded
    /// in the tracking log.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        if self.config.track_changes {
            self.tracking_mut()
                .record_set(&name, Snapshot::infer(&value));
        }
        self.data.insert(name, value)
    }

    /// Reads a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Reads a field, or returns `default` when it is absent.
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Value {
        match self.data.get(name) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Returns true if the field exists, even when it holds `Null`.
    pub fn has(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Removes a field, returning its value. Absent fields are a no-op.
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        let removed = self.data.shift_remove(name);
        if removed.is_some() && self.config.track_changes {
            self.tracking_mut().record_delete(name);
        }
        removed
    }

    /// Writes every entry of `data`, in order.
    pub fn set_data(&mut self, data: Map) {
        for (name, value) in data {
            self.set(name, value);
        }
    }

    /// The whole bag.
    pub fn data(&self) -> &Map {
        &self.data
    }

    /// The existing fields among `keys`, in the requested order.
    ///
    /// An empty key list returns the whole bag.
    pub fn data_for(&self, keys: &[&str]) -> Map {
        if keys.is_empty() {
            return self.data.clone();
        }
        keys.iter()
            .filter_map(|key| self.data.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    /// Consumes the entity, returning its data.
    pub fn into_data(self) -> Map {
        self.data
    }

    /// A plain copy of the bag; nested entities are already stored as maps.
    pub fn to_data_map(&self) -> Map {
        self.data.clone()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the bag holds no fields.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ========== localized fields ==========

    /// Reads a localized field.
    ///
    /// Tries `name_<lang>` (the localizer's current language when `lang`
    /// is `None`), then `name_<default lang>`, then each configured
    /// fallback language, then the bare `name`. A field holding `Null`
    /// counts as absent. Returns `default` when every tier misses.
    pub fn get_localized(
        &self,
        name: &str,
        default: impl Into<Value>,
        lang: Option<&str>,
        localizer: &dyn Localizer,
    ) -> Value {
        let lang = lang.unwrap_or_else(|| localizer.current_lang());
        let languages = [lang, localizer.default_lang()]
            .into_iter()
            .chain(self.config.fallback_languages.iter().map(String::as_str));
        languages
            .map(|lang| localized_key(name, lang))
            .find_map(|key| self.present(&key).cloned())
            .or_else(|| self.present(name).cloned())
            .unwrap_or_else(|| default.into())
    }

    fn present(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|value| !value.is_null())
    }

    // ========== bitmask fields ==========

    /// Reads an integer field, masked when `mask` is given.
    pub fn get_bitmask(&self, name: &str, mask: Option<Mask>) -> i64 {
        let raw = self.data.get(name).map_or(0, Value::to_int);
        match mask {
            Some(mask) => raw & mask.value(),
            None => raw,
        }
    }

    /// Combines an integer field with `mask` (OR, or AND when `use_and`),
    /// stores the result and returns it.
    pub fn set_bitmask(&mut self, name: &str, mask: Mask, use_and: bool) -> i64 {
        let raw = self.get_bitmask(name, None);
        let combined = if use_and {
            raw & mask.value()
        } else {
            raw | mask.value()
        };
        self.set(name, combined);
        combined
    }

    // ========== primary key ==========

    /// Name of the primary key field.
    pub fn primary_key(&self) -> &str {
        self.primary_key
            .as_deref()
            .unwrap_or(&self.config.primary_key)
    }

    /// Value of the primary key field.
    pub fn primary_key_value(&self) -> Option<&Value> {
        self.get(self.primary_key())
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Value::Map(entity.into_data())
    }
}
