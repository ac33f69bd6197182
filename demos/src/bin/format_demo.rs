// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Builds the raw-vs-corrected pair of histograms used throughout this
//! crate's own tests and prints each in both CLASSIC and CSV form, for
//! eyeballing the formatter's output.

use rustcommon_histogram::percentile_printer::{PercentilePrinter, ReportMode};
use rustcommon_histogram::{Histogram, PlainCounts};

fn main() {
    env_logger::init();

    let raw = Histogram::<PlainCounts>::new(1, 100_000_000, 3).unwrap();
    let corrected = Histogram::<PlainCounts>::new(1, 100_000_000, 3).unwrap();

    for _ in 0..10_000 {
        raw.record(1000);
        corrected.record_correct(1000, 10_000);
    }
    raw.record(100_000_000);
    corrected.record_correct(100_000_000, 10_000);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for (label, histogram) in [("raw", &raw), ("corrected", &corrected)] {
        println!("# {label}, classic");
        PercentilePrinter::new(ReportMode::Classic)
            .print(&mut handle, histogram)
            .unwrap();
        println!("# {label}, csv");
        PercentilePrinter::new(ReportMode::Csv)
            .print(&mut handle, histogram)
            .unwrap();
    }
}
