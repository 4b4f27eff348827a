//! Statistics and narrative benchmarks
//!
//! - Pearson / Spearman / least squares over growing samples
//! - Ordinal logit fit
//! - Ladder classification
//! - Upsert batches (in-memory SQLite vs `DashMap`)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hr_analytics::metrics::{MemoryMetricStore, MetricRecord, MetricStore, SqliteMetricStore};
use hr_analytics::narrative::{classify, MetricKind};
use hr_analytics::stats::{linear_regression, pearson, spearman, OrdinalLogit};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Deterministic noisy linear sample
#[allow(clippy::cast_precision_loss)]
fn sample(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y = x
        .iter()
        .enumerate()
        .map(|(i, v)| 0.8f64.mul_add(*v, ((i * 7919) % 101) as f64))
        .collect();
    (x, y)
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");
    for n in SIZES {
        let data = sample(n);
        group.bench_with_input(BenchmarkId::new("pearson", n), &data, |b, (x, y)| {
            b.iter(|| pearson(black_box(x), black_box(y)));
        });
        group.bench_with_input(BenchmarkId::new("spearman", n), &data, |b, (x, y)| {
            b.iter(|| spearman(black_box(x), black_box(y)));
        });
        group.bench_with_input(BenchmarkId::new("linear_regression", n), &data, |b, (x, y)| {
            b.iter(|| linear_regression(black_box(x), black_box(y)));
        });
    }
    group.finish();
}

#[allow(clippy::cast_possible_wrap)]
fn bench_ordinal(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordinal_logit");
    let model = OrdinalLogit::default();
    for n in [100, 1_000] {
        let (x, _) = sample(n);
        let y: Vec<i64> = (0..n).map(|i| (i * 4 / n) as i64 + 1).collect();
        group.bench_with_input(BenchmarkId::new("fit", n), &(x, y), |b, (x, y)| {
            b.iter(|| model.fit(black_box(x), black_box(y)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_all_kinds", |b| {
        b.iter(|| {
            for kind in MetricKind::ALL {
                for value in [-0.7, -0.2, 0.0, 0.049, 0.35, 0.65, 0.95] {
                    let _ = black_box(classify(kind, black_box(value)));
                }
            }
        });
    });
}

fn records(n: usize) -> Vec<MetricRecord> {
    (0..n)
        .filter_map(|i| {
            MetricRecord::new(format!("metric-{}", i % 50), 0.5, "desc", "bench").ok()
        })
        .collect()
}

fn bench_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("upsert_many");
    for n in [10, 100] {
        let batch = records(n);
        group.bench_with_input(BenchmarkId::new("sqlite_memory", n), &batch, |b, batch| {
            let store = SqliteMetricStore::open_in_memory().unwrap();
            store.ensure_schema().unwrap();
            b.iter(|| store.upsert_many(black_box(batch)));
        });
        group.bench_with_input(BenchmarkId::new("dashmap", n), &batch, |b, batch| {
            let store = MemoryMetricStore::new();
            b.iter(|| store.upsert_many(black_box(batch)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_correlation,
    bench_ordinal,
    bench_classify,
    bench_upsert
);
criterion_main!(benches);
