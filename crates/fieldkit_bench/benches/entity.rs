//! Entity benchmarks: plain and tracked writes, validation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fieldkit_bench::random_record;
use fieldkit_core::{BuiltinValidators, Entity, FieldType, ValidationRule};
use fieldkit_value::Value;

/// Benchmark plain writes.
fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for count in [10usize, 100, 1000] {
        let record = random_record(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("plain", count), &record, |b, record| {
            b.iter(|| {
                let entity = Entity::from_data(black_box(record.clone()));
                black_box(entity);
            });
        });
    }

    group.finish();
}

/// Benchmark tracked writes with normalization.
fn bench_set_expanded(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_expanded");

    for (label, field_type) in [
        ("number", FieldType::Number),
        ("string", FieldType::String),
        ("text", FieldType::Text),
    ] {
        let record = random_record(100);
        group.throughput(Throughput::Elements(100));
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut entity = Entity::new();
                for (name, value) in &record {
                    entity.set_expanded(name, value.clone(), field_type);
                }
                black_box(entity.pending_updates(true));
            });
        });
    }

    group.finish();
}

/// Benchmark a validation pass over a typical rule set.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    let mut entity = Entity::named("Topic")
        .with_rule(ValidationRule::new(["title", "text"], "required"))
        .with_rule(ValidationRule::new(["title"], "string").param("max", 200))
        .with_rule(ValidationRule::new(["blog_id"], "number").param("min", 1))
        .with_rule(
            ValidationRule::new(["topic_type"], "inlist")
                .param("range", Value::from(vec!["topic", "link", "question"])),
        );
    entity.set("title", "A benchmark title");
    entity.set("text", "Body");
    entity.set("blog_id", 3);
    entity.set("topic_type", "link");

    group.bench_function("topic", |b| {
        b.iter(|| {
            let valid = entity.validate(None, true, &BuiltinValidators).unwrap();
            black_box(valid);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_set_expanded, bench_validate);
criterion_main!(benches);
