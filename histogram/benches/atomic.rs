// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::BenchmarkId;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main, Criterion};
use rustcommon_histogram::AtomicHistogram;

fn record(c: &mut Criterion) {
    let mut group = c.benchmark_group("AtomicHistogram/record");

    for precision in 1..=5 {
        let histogram =
            AtomicHistogram::new(1, 3_600_000_000_000, precision).unwrap();
        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::new("min/precision", precision), |b| {
            b.iter(|| histogram.record(1))
        });
        group.bench_function(BenchmarkId::new("max/precision", precision), |b| {
            b.iter(|| histogram.record(3_600_000_000_000))
        });
    }
}

fn sample(c: &mut Criterion) {
    let recorder = rustcommon_histogram::IntervalRecorder::new(1, 3_600_000_000_000, 3).unwrap();
    for _ in 0..10_000 {
        recorder.record(1000);
    }

    let mut group = c.benchmark_group("IntervalRecorder/sample");
    group.bench_function("flip_and_snapshot", |b| b.iter(|| recorder.sample()));
}

criterion_group!(benches, record, sample);
criterion_main!(benches);
