//! Array utility benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldkit_arrays::{keys_recursive, merge, str_to_int_list};
use fieldkit_bench::nested_map;

/// Benchmark deep merges of nested maps.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for (depth, width) in [(1usize, 10usize), (3, 5), (5, 3)] {
        let base = nested_map(depth, width);
        let overlay = nested_map(depth, width / 2 + 1);
        group.bench_with_input(
            BenchmarkId::new("nested", format!("{}x{}", depth, width)),
            &(base, overlay),
            |b, (base, overlay)| {
                b.iter(|| black_box(merge(black_box(base), black_box(overlay))));
            },
        );
    }

    group.finish();
}

/// Benchmark flattening nested keys.
fn bench_keys_recursive(c: &mut Criterion) {
    let map = nested_map(4, 4);
    c.bench_function("keys_recursive/4x4", |b| {
        b.iter(|| black_box(keys_recursive(black_box(&map))));
    });
}

/// Benchmark splitting delimited integer lists.
fn bench_str_to_int_list(c: &mut Criterion) {
    let text = (0..1000)
        .map(|i| (i % 250).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    c.bench_function("str_to_int_list/unique_1000", |b| {
        b.iter(|| black_box(str_to_int_list(black_box(&text), ",", true)));
    });
}

criterion_group!(benches, bench_merge, bench_keys_recursive, bench_str_to_int_list);
criterion_main!(benches);
