//! # fieldkit arrays
//!
//! Stateless helpers over fieldkit [`Value`](fieldkit_value::Value) maps
//! and lists: deep merge, key reordering, dotted key paths, delimited text
//! splitting and column extraction.
//!
//! ## Usage
//!
//! ```
//! use fieldkit_arrays::{merge, str_to_list};
//! use fieldkit_value::Value;
//!
//! let base = Value::map([("a", Value::from(vec![1i64, 2]))]).into_map().unwrap();
//! let overlay = Value::map([("a", Value::from(vec![3i64]))]).into_map().unwrap();
//! assert_eq!(merge(&base, &overlay)["a"], Value::from(vec![3i64]));
//!
//! assert_eq!(str_to_list("a, b, ,c", ",", true), vec!["a", "b", "c"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod lookup;
mod split;
mod transform;

pub use lookup::{column, column_indexed, contains_ignore_case, first_key, last_key};
pub use split::{str_to_int_list, str_to_list, value_to_list};
pub use transform::{change_values, flip_int_keys, keys_recursive, merge, sort_by_keys};
