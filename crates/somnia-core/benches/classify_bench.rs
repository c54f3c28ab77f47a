//! Benchmarks for the per-tick work: sampling and classification.

use criterion::{Criterion, criterion_group, criterion_main};
use somnia_core::{SignalSource, UniformSource, classify};
use std::hint::black_box;

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_fixed", |b| {
        b.iter(|| classify(black_box(2.5), black_box(61.0)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut source = UniformSource::seeded(0);
    c.bench_function("sample_and_classify", |b| {
        b.iter(|| black_box(source.sample()).classify())
    });
}

criterion_group!(benches, bench_classify, bench_tick);
criterion_main!(benches);
