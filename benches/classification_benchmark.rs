#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for range classification methods.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo_classify::stats::{jenks, quantile};

fn sorted_data(size: usize) -> Vec<f64> {
    // Deterministic skewed distribution
    let mut data: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 / size as f64;
            (x * std::f64::consts::TAU).sin() * 50.0 + 50.0 + (i % 17) as f64
        })
        .collect();
    data.sort_by(f64::total_cmp);
    data
}

fn jenks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("jenks");

    for size in [100, 1_000, 5_000] {
        let data = sorted_data(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| jenks(black_box(&data), 7));
        });
    }

    group.finish();
}

fn quantile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile");

    for size in [1_000, 10_000, 100_000] {
        let data = sorted_data(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| quantile(black_box(&data), 7));
        });
    }

    group.finish();
}

criterion_group!(benches, jenks_benchmark, quantile_benchmark);
criterion_main!(benches);
