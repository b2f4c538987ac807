//! Criterion micro-benchmarks for field sampling.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::DVec3;
use weft_bench::{query_points, reference_grid, reference_volume};
use weft_core::ExecConfig;
use weft_grid::Domain2d;
use weft_test_utils::random_points;

/// Benchmark: 10K bounds-safe bilinear samples on the reference grid.
fn bench_value_at_2d_10k(c: &mut Criterion) {
    let field = reference_grid(42);
    let points = query_points(&Domain2d::UNIT, 10_000, 1);

    c.bench_function("value_at_2d_10k", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(field.value_at(p));
            }
        });
    });
}

/// Benchmark: the same queries through the interior fast path.
///
/// Points are shrunk toward the centre so every query stays interior.
fn bench_value_at_interior_2d_10k(c: &mut Criterion) {
    let field = reference_grid(42);
    let points: Vec<_> = query_points(&Domain2d::UNIT, 10_000, 1)
        .into_iter()
        .map(|p| p * 0.9 + 0.05)
        .collect();

    c.bench_function("value_at_interior_2d_10k", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(field.value_at_interior(p));
            }
        });
    });
}

/// Benchmark: precompute witnesses once, then gather through them.
fn bench_value_at_point_2d_10k(c: &mut Criterion) {
    let field = reference_grid(42);
    let witnesses: Vec<_> = query_points(&Domain2d::UNIT, 10_000, 1)
        .into_iter()
        .map(|p| field.grid().grid_point(p))
        .collect();

    c.bench_function("value_at_point_2d_10k", |b| {
        b.iter(|| {
            for w in &witnesses {
                black_box(field.value_at_point(w));
            }
        });
    });
}

/// Benchmark: 100K samples through the partitioned batch path.
fn bench_sample_many_2d_100k(c: &mut Criterion) {
    let field = reference_grid(42);
    let points = query_points(&Domain2d::UNIT, 100_000, 2);
    let mut out = vec![0.0; points.len()];

    c.bench_function("sample_many_2d_100k", |b| {
        b.iter(|| {
            field
                .sample_many(&points, &mut out, ExecConfig::parallel())
                .unwrap();
            black_box(&out);
        });
    });
}

/// Benchmark: 10K trilinear samples on the reference volume.
fn bench_value_at_3d_10k(c: &mut Criterion) {
    let field = reference_volume(42);
    let points = random_points(10_000, DVec3::ZERO, DVec3::ONE, 3);

    c.bench_function("value_at_3d_10k", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(field.value_at(p));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_value_at_2d_10k,
    bench_value_at_interior_2d_10k,
    bench_value_at_point_2d_10k,
    bench_sample_many_2d_100k,
    bench_value_at_3d_10k
);
criterion_main!(benches);
