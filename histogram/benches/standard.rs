// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::BenchmarkId;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main, Criterion};
use rustcommon_histogram::{Histogram, PlainCounts};

fn record(c: &mut Criterion) {
    let mut group = c.benchmark_group("Histogram/PlainCounts/record");

    for precision in 1..=5 {
        let histogram =
            Histogram::<PlainCounts>::new(1, 3_600_000_000_000, precision).unwrap();
        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::new("min/precision", precision), |b| {
            b.iter(|| histogram.record(1))
        });
        group.bench_function(BenchmarkId::new("max/precision", precision), |b| {
            b.iter(|| histogram.record(3_600_000_000_000))
        });
    }
}

fn value_at_percentile(c: &mut Criterion) {
    let histogram = Histogram::<PlainCounts>::new(1, 3_600_000_000_000, 3).unwrap();
    for value in 1..=100_000u64 {
        histogram.record(value);
    }

    let mut group = c.benchmark_group("Histogram/PlainCounts/value_at_percentile");
    group.bench_function("p99", |b| b.iter(|| histogram.value_at_percentile(99.0)));
    group.bench_function("p99.99", |b| {
        b.iter(|| histogram.value_at_percentile(99.99))
    });
}

criterion_group!(benches, record, value_at_percentile);
criterion_main!(benches);
