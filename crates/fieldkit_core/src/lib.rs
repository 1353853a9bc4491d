//! # fieldkit core
//!
//! The entity property bag and everything built around it.
//!
//! This crate provides:
//! - [`Entity`]: an ordered bag of named values with localized and bitmask
//!   reads
//! - Method-style dispatch (`getTitle`, `setVoteCount`) resolved through
//!   [`accessor`] helpers and an explicit [`ModuleResolver`]
//! - A change-tracking log ([`TrackingLog`]) for partial persistence
//! - Rule-driven validation with scenarios ([`ValidationRule`],
//!   [`BuiltinValidators`])
//!
//! ```
//! use fieldkit_core::{Entity, FieldType, Snapshot};
//! use fieldkit_value::Value;
//!
//! let mut topic = Entity::for_class("ModuleTopic_EntityTopic");
//! topic.set_expanded("rating", "4.5", FieldType::Number);
//! topic.set_expanded("title", "Hello", FieldType::String);
//!
//! assert_eq!(topic.get_via("getRating"), Some(Value::Float(4.5)));
//! let updates = topic.pending_updates(true);
//! assert_eq!(updates.get("title"), Some(&Snapshot::String("Hello".into())));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
mod bitmask;
mod config;
mod entity;
mod error;
mod lang;
mod model;
mod tracking;
mod validation;

pub use accessor::Accessor;
pub use bitmask::Mask;
pub use config::{EntityConfig, DEFAULT_MAX_STRING_LEN};
pub use entity::{Entity, Getter, ModuleResolver, Modules, NoModules};
pub use error::{CoreError, CoreResult};
pub use lang::{Localizer, StaticLocalizer};
pub use model::Model;
pub use tracking::{FieldType, Snapshot, TrackingLog};
pub use validation::{
    scenario_applies, BuiltinValidators, ValidationErrors, ValidationRule, Validator,
    ValidatorFactory,
};
