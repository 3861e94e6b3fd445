//! Benchmarks for unique-prefix computation and partial-ID resolution.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mint_lib::id::random_suffix;
use mint_lib::prefix::{min_unique_prefix_lengths, resolve_partial_id};

fn make_ids(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| format!("mint-{}", random_suffix(6).unwrap_or_default()))
        .collect()
}

fn bench_unique_prefixes(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_prefix_lengths");
    for count in [100, 1_000, 10_000] {
        let ids = make_ids(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &ids, |b, ids| {
            b.iter(|| min_unique_prefix_lengths(black_box(ids).iter().map(String::as_str)));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_partial_id");
    for count in [100, 1_000, 10_000] {
        let ids = make_ids(count);
        let target = ids[count / 2].clone();
        group.bench_with_input(BenchmarkId::from_parameter(count), &ids, |b, ids| {
            b.iter(|| {
                resolve_partial_id(black_box(&target), ids.iter().map(String::as_str)).ok()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unique_prefixes, bench_resolve);
criterion_main!(benches);
