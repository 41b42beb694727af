//! # Tensor Math Benchmarks
//!
//! Measures matrix multiply, transpose and bias row/column editing.
//!
//! Run: `cargo bench --bench tensor_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neural_benches::filled;
use neural_core::core::math::{add_col, add_row, multiply, remove_col, transpose};

/// Benchmark square matrix multiply
fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for size in [4, 16, 64] {
        let a = filled(size, size, 1);
        let b = filled(size, size, 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(multiply(&a, &b).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark a single-row input against a weight matrix (one forward step)
fn bench_row_times_matrix(c: &mut Criterion) {
    let x = filled(1, 128, 3);
    let w = filled(128, 64, 4);

    c.bench_function("row_x_128x64", |b| {
        b.iter(|| black_box(multiply(&x, &w).unwrap()))
    });
}

/// Benchmark transpose
fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");

    for size in [16, 64] {
        let a = filled(size, size, 5);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(transpose(&a).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark bias column/row editing
fn bench_bias_editing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bias_editing");
    let a = filled(64, 64, 6);
    let with_col = add_col(&a, 1.0).unwrap();

    group.bench_function("add_col", |b| {
        b.iter(|| black_box(add_col(&a, 1.0).unwrap()))
    });

    group.bench_function("remove_col", |b| {
        b.iter(|| black_box(remove_col(&with_col).unwrap()))
    });

    group.bench_function("add_row", |b| {
        b.iter(|| black_box(add_row(&a, 1.0).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_multiply,
    bench_row_times_matrix,
    bench_transpose,
    bench_bias_editing,
);

criterion_main!(benches);
