//! Conversions from delimited text and loose values to lists.

use fieldkit_value::Value;
use indexmap::IndexSet;

/// Splits `text` on `separator` and trims each item.
///
/// With `skip_empty`, items that are empty after trimming are dropped.
pub fn str_to_list(text: &str, separator: &str, skip_empty: bool) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !(skip_empty && item.is_empty()))
        .map(str::to_string)
        .collect()
}

/// Splits `text` into integers.
///
/// Items are read with [`Value::to_int`], so `"7x"` gives 7 and `"x"` gives
/// 0. With `unique`, empty items are skipped and repeated numbers are kept
/// only once, at their first position.
pub fn str_to_int_list(text: &str, separator: &str, unique: bool) -> Vec<i64> {
    let numbers = str_to_list(text, separator, unique)
        .into_iter()
        .map(|item| Value::Text(item).to_int());

    if unique {
        numbers.collect::<IndexSet<i64>>().into_iter().collect()
    } else {
        numbers.collect()
    }
}

/// Normalizes a loose value into a list.
///
/// | input | output |
/// |---|---|
/// | `null` | `[]` |
/// | `false` | `[false]` |
/// | `[true, false]` | `[true, false]` |
/// | `"a, b"` | `["a", "b"]` |
/// | `["a, b"]` | `["a", "b"]` |
/// | `["a", "b"]` | `["a", "b"]` |
///
/// Map input yields its values.
pub fn value_to_list(value: &Value, separator: &str, skip_empty: bool) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Text(text) => text_items(text, separator, skip_empty),
        Value::List(items) => match items.as_slice() {
            [Value::Text(text)] if text.contains(',') => text_items(text, separator, skip_empty),
            _ => items.clone(),
        },
        Value::Map(m) => m.values().cloned().collect(),
        scalar => vec![scalar.clone()],
    }
}

fn text_items(text: &str, separator: &str, skip_empty: bool) -> Vec<Value> {
    str_to_list(text, separator, skip_empty)
        .into_iter()
        .map(Value::Text)
        .collect()
}
