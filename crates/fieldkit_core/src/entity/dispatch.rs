//! Method-style access to entity fields.
//!
//! `getX` / `setX` names are resolved against the bag, registered computed
//! getters and the module prefix. Any other name is handed to a
//! [`ModuleResolver`] supplied by the caller.

use super::Entity;
use crate::accessor::{self, Accessor};
use crate::error::{CoreError, CoreResult};
use fieldkit_value::{Map, Value};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use tracing::trace;

/// A computed getter, evaluated against the entity on read.
pub type Getter = fn(&Entity) -> Value;

/// Handles method calls that are not field accessors.
pub trait ModuleResolver {
    /// Resolves `method` with `args`.
    ///
    /// Returns [`CoreError::UnknownMethod`] for names it does not handle.
    fn resolve(&self, method: &str, args: &[Value]) -> CoreResult<Value>;
}

/// A resolver that handles nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModules;

impl ModuleResolver for NoModules {
    fn resolve(&self, method: &str, _args: &[Value]) -> CoreResult<Value> {
        Err(CoreError::unknown_method(method))
    }
}

type Handler = Box<dyn Fn(&[Value]) -> CoreResult<Value> + Send + Sync>;

/// A table of module handlers addressed as `Module_Method`.
#[derive(Default)]
pub struct Modules {
    handlers: IndexMap<String, Handler>,
}

impl Modules {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `module_method`.
    #[must_use]
    pub fn register<F>(mut self, module: &str, method: &str, handler: F) -> Self
    where
        F: Fn(&[Value]) -> CoreResult<Value> + Send + Sync + 'static,
    {
        self.handlers
            .insert(format!("{module}_{method}"), Box::new(handler));
        self
    }

    /// Returns true if a handler is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl fmt::Debug for Modules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl ModuleResolver for Modules {
    fn resolve(&self, method: &str, args: &[Value]) -> CoreResult<Value> {
        let Some((module, _)) = method.split_once('_') else {
            return Err(CoreError::unknown_method(method));
        };
        match self.handlers.get(method) {
            Some(handler) => {
                trace!(module, method, "module call");
                handler(args)
            }
            None => Err(CoreError::unknown_method(method)),
        }
    }
}

impl Entity {
    /// Registers a computed getter for `field`.
    ///
    /// Computed getters are consulted when the bag has no such field.
    pub fn register_computed(&mut self, field: impl Into<String>, getter: Getter) {
        self.computed.insert(field.into(), getter);
    }

    /// Builder form of [`register_computed`](Self::register_computed).
    #[must_use]
    pub fn with_computed(mut self, field: impl Into<String>, getter: Getter) -> Self {
        self.register_computed(field, getter);
        self
    }

    /// Reads through a getter name such as `getVoteCount`.
    ///
    /// Looks at the bare field, then a computed getter, then the field
    /// under the module prefix. `None` when nothing matches or the name is
    /// not a getter.
    pub fn get_via(&self, method: &str) -> Option<Value> {
        let Some(Accessor::Get(field)) = accessor::parse(method) else {
            return None;
        };
        if let Some(value) = self.data.get(&field) {
            return Some(value.clone());
        }
        if let Some(getter) = self.computed.get(&field) {
            return Some(getter(self));
        }
        let prefix = self.module_prefix.as_deref()?;
        let prefixed = format!("{prefix}_{field}");
        trace!(entity = %self.name, field = %prefixed, "prefixed lookup");
        self.data.get(&prefixed).cloned()
    }

    /// Writes through a setter name such as `setVoteCount`.
    pub fn set_via(&mut self, method: &str, value: impl Into<Value>) -> CoreResult<Option<Value>> {
        match accessor::parse(method) {
            Some(Accessor::Set(field)) => Ok(self.set(field, value)),
            _ => Err(CoreError::unknown_method(method)),
        }
    }

    /// Calls a method by name.
    ///
    /// A getter with no arguments and a setter with one are handled here;
    /// setters return `Null`. Everything else goes to `resolver`.
    pub fn call(
        &mut self,
        method: &str,
        args: Vec<Value>,
        resolver: &dyn ModuleResolver,
    ) -> CoreResult<Value> {
        match accessor::parse(method) {
            Some(Accessor::Get(_)) if args.is_empty() => {
                Ok(self.get_via(method).unwrap_or_default())
            }
            Some(Accessor::Set(field)) if args.len() == 1 => {
                if let Some(value) = args.into_iter().next() {
                    self.set(field, value);
                }
                Ok(Value::Null)
            }
            _ => {
                trace!(entity = %self.name, method, "forwarding call");
                resolver.resolve(method, &args)
            }
        }
    }

    /// Getter names for every field and computed getter.
    pub fn accessor_methods(&self) -> Vec<String> {
        self.data
            .keys()
            .chain(self.computed.keys())
            .map(|field| accessor::getter_name(field))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Maps field values by name, each key prefixed with `prefix`.
    ///
    /// Without `methods`, every stored field is copied under its own name,
    /// followed by every computed getter the bag does not shadow. With
    /// `methods`, names that are not plain getters are skipped, keys come
    /// from [`accessor::mapping_key`] and getters that find nothing map to
    /// `Null`.
    pub fn to_mapping(&self, methods: Option<&[&str]>, prefix: &str) -> Map {
        let Some(methods) = methods else {
            let stored = self
                .data
                .iter()
                .map(|(field, value)| (format!("{prefix}{field}"), value.clone()));
            let computed = self
                .computed
                .iter()
                .filter(|(field, _)| !self.data.contains_key(field.as_str()))
                .map(|(field, getter)| (format!("{prefix}{field}"), getter(self)));
            return stored.chain(computed).collect();
        };
        methods
            .iter()
            .filter_map(|method| {
                let key = accessor::mapping_key(method)?;
                let value = self.get_via(method).unwrap_or_default();
                Some((format!("{prefix}{key}"), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_total(entity: &Entity) -> Value {
        Value::Integer(
            entity.get_bitmask("votes_up", None) + entity.get_bitmask("votes_down", None),
        )
    }

    fn topic() -> Entity {
        let mut e = Entity::for_class("ModuleTopic_EntityTopic")
            .with_computed("vote_total", vote_total);
        e.set("title", "Hello");
        e.set("votes_up", 3);
        e.set("votes_down", 2);
        e.set("topic_rating", 9);
        e
    }

    #[test]
    fn get_via_tiers() {
        let e = topic();

        assert_eq!(e.get_via("getTitle"), Some(Value::from("Hello")));
        assert_eq!(e.get_via("getVoteTotal"), Some(Value::Integer(5)));
        assert_eq!(e.get_via("getRating"), Some(Value::Integer(9)));
        assert_eq!(e.get_via("getMissing"), None);
        assert_eq!(e.get_via("setTitle"), None);
    }

    #[test]
    fn bare_field_wins_over_computed() {
        let mut e = topic();
        e.set("vote_total", 100);

        assert_eq!(e.get_via("getVoteTotal"), Some(Value::Integer(100)));
    }

    #[test]
    fn set_via_writes_field() {
        let mut e = topic();

        assert_eq!(
            e.set_via("setTitle", "Bye").unwrap(),
            Some(Value::from("Hello"))
        );
        assert_eq!(e.get("title"), Some(&Value::from("Bye")));
        assert_eq!(
            e.set_via("getTitle", "x").unwrap_err(),
            CoreError::unknown_method("getTitle")
        );
    }

    #[test]
    fn call_handles_accessors_locally() {
        let mut e = topic();

        assert_eq!(e.call("getTitle", vec![], &NoModules).unwrap(), Value::from("Hello"));
        assert_eq!(
            e.call("setTitle", vec![Value::from("New")], &NoModules).unwrap(),
            Value::Null
        );
        assert_eq!(e.get("title"), Some(&Value::from("New")));
        assert_eq!(e.call("getNothing", vec![], &NoModules).unwrap(), Value::Null);
    }

    #[test]
    fn call_forwards_to_modules() {
        let modules = Modules::new().register("User", "GetUserById", |args| {
            Ok(Value::map([("id", args.first().cloned().unwrap_or_default())]))
        });
        let mut e = topic();

        let user = e
            .call("User_GetUserById", vec![Value::Integer(4)], &modules)
            .unwrap();
        assert_eq!(user.get("id"), Some(&Value::Integer(4)));

        assert_eq!(
            e.call("User_Missing", vec![], &modules).unwrap_err(),
            CoreError::unknown_method("User_Missing")
        );
        assert_eq!(
            e.call("fetchAll", vec![], &NoModules).unwrap_err(),
            CoreError::unknown_method("fetchAll")
        );
    }

    #[test]
    fn setter_without_argument_is_forwarded() {
        let mut e = topic();

        let err = e.call("setTitle", vec![], &NoModules).unwrap_err();
        assert_eq!(err, CoreError::unknown_method("setTitle"));
        assert_eq!(e.get("title"), Some(&Value::from("Hello")));
    }

    #[test]
    fn mapping_from_all_getters() {
        let e = topic();

        let map = e.to_mapping(None, "");
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            ["title", "votes_up", "votes_down", "topic_rating", "vote_total"]
        );
        assert_eq!(map.get("vote_total"), Some(&Value::Integer(5)));
    }

    #[test]
    fn accessor_methods_cover_fields_and_computed() {
        let mut e = topic();
        e.set("vote_total", 1);

        assert_eq!(
            e.accessor_methods(),
            ["getTitle", "getVotesUp", "getVotesDown", "getTopicRating", "getVoteTotal"]
        );
    }

    #[test]
    fn mapping_keeps_field_names_verbatim() {
        let mut e = topic();
        e.set("vote_2", 7);
        e.set("Title", "x");

        let map = e.to_mapping(None, "");

        assert_eq!(map.get("vote_2"), Some(&Value::Integer(7)));
        assert_eq!(map.get("Title"), Some(&Value::from("x")));
        assert_eq!(map.get("title"), Some(&Value::from("Hello")));
        assert!(!map.contains_key("vote2"));
    }

    #[test]
    fn mapping_skips_shadowed_computed_getters() {
        let mut e = topic();
        e.set("vote_total", 100);

        let map = e.to_mapping(None, "t_");

        assert_eq!(map.get("t_vote_total"), Some(&Value::Integer(100)));
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn mapping_from_selected_methods() {
        let e = topic();

        let map = e.to_mapping(Some(&["getTitle", "getRating", "get_raw", "getMissing"]), "t_");
        assert_eq!(map.get("t_title"), Some(&Value::from("Hello")));
        assert_eq!(map.get("t_rating"), Some(&Value::Integer(9)));
        assert_eq!(map.get("t_missing"), Some(&Value::Null));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn modules_debug_lists_handlers() {
        let modules = Modules::new().register("Topic", "Count", |_| Ok(Value::Integer(0)));
        assert!(modules.contains("Topic_Count"));
        assert_eq!(format!("{modules:?}"), r#"{"Topic_Count"}"#);
    }
}
