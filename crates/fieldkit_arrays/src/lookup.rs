//! Key and column lookups.

use fieldkit_value::{Map, Value};

/// Returns the first key of `map`.
pub fn first_key(map: &Map) -> Option<&str> {
    map.keys().next().map(String::as_str)
}

/// Returns the last key of `map`.
pub fn last_key(map: &Map) -> Option<&str> {
    map.keys().next_back().map(String::as_str)
}

/// Case-insensitive membership test.
pub fn contains_ignore_case<S: AsRef<str>>(needle: &str, haystack: &[S]) -> bool {
    let needle = needle.to_lowercase();
    haystack
        .iter()
        .any(|candidate| candidate.as_ref().to_lowercase() == needle)
}

/// Extracts the `column` field from every map row.
///
/// Rows that are not maps, lack `column`, or hold `null` there are skipped.
pub fn column(rows: &[Value], column: &str) -> Vec<Value> {
    rows.iter()
        .filter_map(|row| present(row, column).cloned())
        .collect()
}

fn present<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|v| !v.is_null())
}

/// Extracts `column` from every map row, keyed by the row's `index` field.
///
/// Index values are rendered with [`Value::to_text`]; a later row with the
/// same index replaces the earlier one. Rows without an `index` field, or
/// with a `null` one, are appended under the next free integer key, the
/// way a growing list would number them.
pub fn column_indexed(rows: &[Value], column: &str, index: &str) -> Map {
    let mut out = Map::new();
    let mut next_index: i64 = 0;

    for row in rows {
        let Some(value) = present(row, column) else {
            continue;
        };
        let key = match present(row, index) {
            Some(key) => {
                let key = key.to_text();
                if let Ok(n) = key.parse::<i64>() {
                    next_index = next_index.max(n.saturating_add(1));
                }
                key
            }
            None => {
                let key = next_index.to_string();
                next_index += 1;
                key
            }
        };
        out.insert(key, value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Value> {
        vec![
            Value::map([("id", Value::Integer(3)), ("name", Value::from("alice"))]),
            Value::map([("id", Value::Integer(7)), ("other", Value::Bool(true))]),
            Value::map([("name", Value::from("bob"))]),
            Value::from("not a row"),
            Value::map([("id", Value::from("x")), ("name", Value::from("carol"))]),
            Value::map([("id", Value::Integer(9)), ("name", Value::Null)]),
        ]
    }

    #[test]
    fn first_and_last_key() {
        let map = Value::map([("a", Value::Null), ("b", Value::Null)])
            .into_map()
            .unwrap();
        assert_eq!(first_key(&map), Some("a"));
        assert_eq!(last_key(&map), Some("b"));
        assert_eq!(first_key(&Map::new()), None);
    }

    #[test]
    fn case_insensitive_membership() {
        assert!(contains_ignore_case("Admin", &["user", "ADMIN"]));
        assert!(contains_ignore_case("ПРИВЕТ", &["привет"]));
        assert!(!contains_ignore_case("root", &["user"]));
    }

    #[test]
    fn column_without_index() {
        assert_eq!(
            column(&rows(), "name"),
            vec![
                Value::from("alice"),
                Value::from("bob"),
                Value::from("carol"),
            ]
        );
        assert!(!column(&rows(), "name").contains(&Value::Null));
    }

    #[test]
    fn column_with_index() {
        let out = column_indexed(&rows(), "name", "id");

        let pairs: Vec<(&str, &Value)> = out.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(
            pairs,
            vec![
                ("3", &Value::from("alice")),
                ("4", &Value::from("bob")),
                ("x", &Value::from("carol")),
            ]
        );
    }

    #[test]
    fn null_index_counts_as_missing() {
        let rows = vec![
            Value::map([("id", Value::Integer(5)), ("name", Value::from("dave"))]),
            Value::map([("id", Value::Null), ("name", Value::from("erin"))]),
        ];

        let out = column_indexed(&rows, "name", "id");

        assert_eq!(out.get("5"), Some(&Value::from("dave")));
        assert_eq!(out.get("6"), Some(&Value::from("erin")));
        assert_eq!(out.len(), 2);
    }
}
