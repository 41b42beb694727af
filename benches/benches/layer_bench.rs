//! # Layer Benchmarks
//!
//! Measures linear layer forward/backward/update and a full training epoch.
//!
//! Run: `cargo bench --bench layer_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neural_benches::filled;
use neural_core::prelude::*;

/// Benchmark linear layer passes
fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");

    let weights = filled(32, 16, 7);
    let input = filled(1, 32, 8);
    let grad = filled(1, 16, 9);

    let layer = LinearLayer::new(&weights, true).unwrap();
    group.bench_function("forward", |b| {
        b.iter(|| black_box(layer.forward(&input).unwrap()))
    });

    group.bench_function("backward_update", |b| {
        let mut layer = LinearLayer::new(&weights, true).unwrap();
        b.iter(|| {
            black_box(layer.backward(&input, &grad).unwrap());
            layer.update_weights(0.01).unwrap();
        })
    });

    group.finish();
}

/// Benchmark one epoch of the sample network
fn bench_sample_epoch(c: &mut Criterion) {
    let config = TrainingConfig::default();
    let dataset = config.dataset().unwrap();
    let trainer = Trainer::new(1, config.learning_rate);

    c.bench_function("sample_network_epoch", |b| {
        let mut model = config.build_model().unwrap();
        b.iter(|| {
            black_box(trainer.fit(&mut model, &SquaredErrorLoss, &dataset).unwrap())
        })
    });
}

criterion_group!(benches, bench_linear, bench_sample_epoch);

criterion_main!(benches);
