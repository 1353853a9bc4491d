//! Structural transforms over maps.

use fieldkit_value::{Map, Value};

/// Wraps every scalar leaf of `map` in `before` and `after`.
///
/// Nested maps and lists are walked recursively. Leaves are rendered with
/// [`Value::to_text`], so `null` becomes `before + after`.
pub fn change_values(map: &Map, before: &str, after: &str) -> Map {
    map.iter()
        .map(|(k, v)| (k.clone(), change_value(v, before, after)))
        .collect()
}

fn change_value(value: &Value, before: &str, after: &str) -> Value {
    match value {
        Value::Map(m) => Value::Map(change_values(m, before, after)),
        Value::List(items) => Value::List(
            items
                .iter()
                .map(|v| change_value(v, before, after))
                .collect(),
        ),
        scalar => Value::Text(format!("{before}{}{after}", scalar.to_text())),
    }
}

/// Turns a list of names into a presence map.
///
/// Every truthy text item becomes a key mapped to `default`. Empty and
/// `"0"` items are dropped. Items that are not text stay under their list
/// index. A map is returned unchanged, `null` gives an empty map and any
/// other scalar is treated as a one-item list.
pub fn flip_int_keys(value: &Value, default: &Value) -> Map {
    let items = match value {
        Value::Null => return Map::new(),
        Value::Map(m) => return m.clone(),
        Value::List(items) => items.as_slice(),
        scalar => std::slice::from_ref(scalar),
    };

    let mut out = Map::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Text(name) => {
                if item.is_truthy() {
                    out.insert(name.clone(), default.clone());
                }
            }
            other => {
                out.insert(index.to_string(), other.clone());
            }
        }
    }
    out
}

/// Reorders `map` to follow `keys`.
///
/// Keys that are missing from `map`, or hold `null`, are left out.
pub fn sort_by_keys<K: AsRef<str>>(map: &Map, keys: &[K]) -> Map {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            map.get(key)
                .filter(|v| !v.is_null())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

/// Deep-merges `overlay` into `base`.
///
/// Nested maps present on both sides merge recursively. Lists and scalars
/// from `overlay` replace whatever `base` holds: lists are never
/// concatenated.
pub fn merge(base: &Map, overlay: &Map) -> Map {
    let mut out = base.clone();
    for (key, value) in overlay {
        let merged = match (out.get(key), value) {
            (Some(Value::Map(existing)), Value::Map(incoming)) => {
                Value::Map(merge(existing, incoming))
            }
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

/// Flattens nested keys into dotted paths.
///
/// `{"a": {"b": 1}, "c": [5]}` yields `["a.b", "c.0"]`. Empty nested
/// containers keep their own key.
pub fn keys_recursive(map: &Map) -> Vec<String> {
    let mut out = Vec::new();
    for (key, value) in map {
        collect_paths(key, value, &mut out);
    }
    out
}

fn collect_paths(path: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Map(m) if !m.is_empty() => {
            for (key, child) in m {
                collect_paths(&format!("{path}.{key}"), child, out);
            }
        }
        Value::List(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                collect_paths(&format!("{path}.{index}"), child, out);
            }
        }
        _ => out.push(path.to_string()),
    }
}
