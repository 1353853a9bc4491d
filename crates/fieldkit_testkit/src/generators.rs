//! Property-based test generators using proptest.
//!
//! Field names are generated so that they survive the accessor naming
//! round trip (`vote_count` → `getVoteCount` → `vote_count`).

use fieldkit_core::{Entity, FieldType};
use fieldkit_value::Value;
use proptest::prelude::*;

/// Strategy for snake_case field names made of two-letter-or-longer words.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}(_[a-z]{2,6}){0,2}").expect("Invalid regex")
}

/// Strategy for scalar values (never `Null`).
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        prop::string::string_regex("[a-zA-Z0-9 ]{0,24}")
            .expect("Invalid regex")
            .prop_map(Value::Text),
    ]
}

/// Strategy for arbitrary values, nested up to three levels.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![1 => Just(Value::Null), 4 => scalar_value_strategy()];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((field_name_strategy(), inner), 0..4).prop_map(Value::map),
        ]
    })
}

/// Strategy for declared field types.
pub fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Number),
        Just(FieldType::String),
        Just(FieldType::Text),
    ]
}

/// One mutation applied to an entity.
#[derive(Debug, Clone)]
pub enum FieldOperation {
    /// Plain write
    Set {
        /// Field name
        name: String,
        /// New value
        value: Value,
    },
    /// Tracked, normalized write
    SetExpanded {
        /// Field name
        name: String,
        /// New value
        value: Value,
        /// Declared type
        field_type: FieldType,
    },
    /// Tracked removal
    Delete {
        /// Field name
        name: String,
    },
}

impl FieldOperation {
    /// The field this operation touches.
    pub fn name(&self) -> &str {
        match self {
            FieldOperation::Set { name, .. }
            | FieldOperation::SetExpanded { name, .. }
            | FieldOperation::Delete { name } => name,
        }
    }

    /// Applies the operation to `entity`.
    pub fn apply(&self, entity: &mut Entity) {
        match self {
            FieldOperation::Set { name, value } => {
                entity.set(name.clone(), value.clone());
            }
            FieldOperation::SetExpanded {
                name,
                value,
                field_type,
            } => {
                entity.set_expanded(name, value.clone(), *field_type);
            }
            FieldOperation::Delete { name } => {
                entity.delete_expanded(name);
            }
        }
    }
}

/// Strategy for operations over a small pool of field names, so that
/// sequences revisit the same fields.
pub fn field_operation_strategy() -> impl Strategy<Value = FieldOperation> {
    let name = prop::sample::select(vec!["title", "text", "rating", "flags", "blog_id"])
        .prop_map(str::to_string);
    prop_oneof![
        2 => (name.clone(), value_strategy())
            .prop_map(|(name, value)| FieldOperation::Set { name, value }),
        3 => (name.clone(), value_strategy(), field_type_strategy())
            .prop_map(|(name, value, field_type)| FieldOperation::SetExpanded {
                name,
                value,
                field_type,
            }),
        1 => name.prop_map(|name| FieldOperation::Delete { name }),
    ]
}

/// Strategy for a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<FieldOperation>> {
    prop::collection::vec(field_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
