//! # fieldkit value
//!
//! Dynamic values for fieldkit entities.
//!
//! Entity fields are loosely typed: a request handler may put text where a
//! storage layer later expects a number. This crate provides:
//! - `Value`, a dynamic value (scalars, ordered lists, ordered maps)
//! - `Map`, the insertion-ordered field map
//! - loose coercions (`to_int`, `to_text`, `is_truthy`)
//! - a JSON bridge that keeps key order
//!
//! ## Usage
//!
//! ```
//! use fieldkit_value::Value;
//!
//! let value = Value::from_json_str(r#"{"title": "Hello", "votes": "12"}"#).unwrap();
//! assert_eq!(value.get("votes").map(Value::to_int), Some(12));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod value;

pub use error::{ValueError, ValueResult};
pub use value::{Map, Value};
