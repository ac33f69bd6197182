// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! High dynamic range histograms for recording latencies and other
//! non-negative integer magnitudes with a bounded, configurable relative
//! error across a wide trackable range.
//!
//! A [`Histogram`] is parameterized over its counts storage policy:
//! [`counts::PlainCounts`] for single-threaded use, or
//! [`counts::AtomicCounts`] (aliased as [`AtomicHistogram`]) for
//! concurrent recording. [`recorder::IntervalRecorder`] pairs two atomic
//! histograms with a [`phaser::Phaser`] so a sampler can take a quiesced
//! snapshot of recent activity without ever blocking recorders.
//!
//! The [`codec`] and [`log`] modules implement the crate's on-disk
//! formats: a big-endian binary encoding (optionally deflate-compressed)
//! and a line-oriented interval log built on top of it.

pub mod base64;
pub mod clock;
pub mod codec;
pub mod config;
pub mod counts;
pub mod error;
pub mod histogram;
pub mod iter;
pub mod log;
pub mod percentile_printer;
pub mod phaser;
pub mod recorder;

pub use config::Config;
pub use counts::{AtomicCounts, PlainCounts};
pub use error::{CodecError, HistogramError, LogError};
pub use histogram::{AtomicHistogram, Histogram};
pub use percentile_printer::{PercentilePrinter, ReportMode};
pub use phaser::{Phaser, YieldStrategy};
pub use recorder::IntervalRecorder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        assert_eq!(h.value_at_percentile(0.0), 0);

        h.record(1);
        assert!(h.values_are_equivalent(h.value_at_percentile(0.0), 1));
        assert!(h.values_are_equivalent(h.value_at_percentile(100.0), 1));

        h.record(3_600_000_000);
        assert!(h.values_are_equivalent(h.value_at_percentile(100.0), 3_600_000_000));
    }

    #[test]
    fn rejects_bad_construction_arguments() {
        assert_eq!(
            Histogram::<PlainCounts>::new(0, 100, 3).unwrap_err(),
            HistogramError::InvalidArgument("lowest_discernible_value must be >= 1")
        );
    }
}
