//! Benchmark utilities.

#![warn(missing_docs)]

use fieldkit_value::{Map, Value};
use rand::Rng;

/// Generate a random scalar value.
pub fn random_scalar<R: Rng>(rng: &mut R) -> Value {
    match rng.gen_range(0..4) {
        0 => Value::Bool(rng.gen()),
        1 => Value::Integer(rng.gen_range(-1_000_000..1_000_000)),
        2 => Value::Float(rng.gen_range(-1.0e6..1.0e6)),
        _ => Value::Text(random_text(rng, 24)),
    }
}

/// Generate lowercase text of up to `max_len` characters.
pub fn random_text<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// Generate a flat record with `fields` random scalars.
pub fn random_record(fields: usize) -> Map {
    let mut rng = rand::thread_rng();
    (0..fields)
        .map(|i| (format!("field_{}", i), random_scalar(&mut rng)))
        .collect()
}

/// Generate a nested map `depth` levels deep with `width` keys per level.
pub fn nested_map(depth: usize, width: usize) -> Map {
    (0..width)
        .map(|i| {
            let value = if depth == 0 {
                Value::Text("leaf".into())
            } else {
                Value::Map(nested_map(depth - 1, width))
            };
            (format!("key_{}", i), value)
        })
        .collect()
}
