//! Criterion benches for the metric kernels.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use zengrid_core::domain::ForecastBias;
use zengrid_runner::{bias_breakdown, hit_stats, rolling_accuracy, ROLLING_WINDOW};

fn hits_fixture(n: usize) -> Vec<bool> {
    (0..n).map(|i| i % 7 != 0 && i % 3 != 1).collect()
}

fn bench_hit_stats(c: &mut Criterion) {
    let hits = hits_fixture(10_000);
    c.bench_function("hit_stats_10k", |b| {
        b.iter(|| hit_stats(black_box(&hits).iter().copied()))
    });
}

fn bench_rolling_accuracy(c: &mut Criterion) {
    let hits = hits_fixture(10_000);
    c.bench_function("rolling_accuracy_10k_w30", |b| {
        b.iter(|| rolling_accuracy(black_box(&hits), ROLLING_WINDOW))
    });
}

fn bench_bias_breakdown(c: &mut Criterion) {
    let items: Vec<(ForecastBias, bool)> = (0..10_000)
        .map(|i| {
            let bias = match i % 3 {
                0 => ForecastBias::Bullish,
                1 => ForecastBias::Bearish,
                _ => ForecastBias::Neutral,
            };
            (bias, i % 2 == 0)
        })
        .collect();
    c.bench_function("bias_breakdown_10k", |b| {
        b.iter(|| bias_breakdown(black_box(&items).iter().cloned()))
    });
}

criterion_group!(
    benches,
    bench_hit_stats,
    bench_rolling_accuracy,
    bench_bias_breakdown
);
criterion_main!(benches);
