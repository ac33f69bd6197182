// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::counts::{AtomicCounts, CountsBackend, PlainCounts};
use crate::error::HistogramError;
use crate::config::Config;
use crate::iter::{AllValues, LinearValues, LogarithmicValues, PercentileValues, RecordedValues};

/// A histogram which records non-negative integer magnitudes with bounded
/// relative precision across a wide dynamic range.
///
/// `Histogram<PlainCounts>` is a plain, single-threaded histogram.
/// `Histogram<AtomicCounts>` additionally permits concurrent recording
/// from multiple threads; see [`AtomicHistogram`].
pub struct Histogram<C = PlainCounts> {
    config: Config,
    counts: C,
}

/// A histogram whose counters may be updated concurrently from multiple
/// threads without external synchronization.
pub type AtomicHistogram = Histogram<AtomicCounts>;

impl<C: CountsBackend> Histogram<C> {
    /// Construct a new histogram tracking values in
    /// `[lowest_discernible_value, highest_trackable_value]` with the
    /// requested number of significant decimal digits of precision.
    pub fn new(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
    ) -> Result<Self, HistogramError> {
        let config = Config::new(
            lowest_discernible_value,
            highest_trackable_value,
            significant_figures,
        )?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: Config) -> Self {
        Histogram {
            counts: C::with_len(config.counts_len()),
            config,
        }
    }

    /// The geometry this histogram was constructed with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Record a single occurrence of `value`. Returns `true` if the value
    /// was within the trackable range and stored, `false` otherwise.
    pub fn record(&self, value: u64) -> bool {
        self.record_n(value, 1)
    }

    /// Record `count` occurrences of `value`.
    pub fn record_n(&self, value: u64, count: u64) -> bool {
        match self.config.counts_index(value) {
            Some(index) => {
                self.counts.add(index, count);
                self.counts.add_total(count);
                self.counts.update_min_max(value);
                true
            }
            None => false,
        }
    }

    /// Record `value`, then backfill the linear series of values between
    /// `value - expected_interval` and `expected_interval` (stepping down
    /// by `expected_interval`) to compensate for coordinated omission in
    /// latency sampling. If `expected_interval` is zero this behaves
    /// exactly like [`Histogram::record`].
    pub fn record_correct(&self, value: u64, expected_interval: u64) -> bool {
        let recorded = self.record(value);
        if expected_interval == 0 || value <= expected_interval {
            return recorded;
        }
        let mut missing_value = value - expected_interval;
        while missing_value >= expected_interval {
            self.record(missing_value);
            missing_value -= expected_interval;
        }
        recorded
    }

    /// Zero all counts and reset extrema; geometry is unchanged.
    pub fn reset(&self) {
        self.counts.clear();
        self.counts.clear_total();
        self.counts.clear_min_max();
    }

    /// Total number of samples currently recorded.
    pub fn total_count(&self) -> u64 {
        self.counts.total()
    }

    /// The count stored at a raw counts-array index.
    pub fn count_at_index(&self, index: usize) -> u64 {
        self.counts.get(index)
    }

    /// The count stored for `value`'s equivalence range, or `0` if `value`
    /// is out of range.
    pub fn count_at_value(&self, value: u64) -> u64 {
        self.config
            .counts_index(value)
            .map(|index| self.counts.get(index))
            .unwrap_or(0)
    }

    /// The smallest non-zero value recorded, or `0` if the histogram is empty.
    pub fn min(&self) -> u64 {
        let min = self.counts.min();
        if min == u64::MAX {
            0
        } else {
            min
        }
    }

    /// The largest value recorded, or `0` if the histogram is empty.
    pub fn max(&self) -> u64 {
        self.counts.max()
    }

    /// Whether `a` and `b` are indistinguishable under this histogram's
    /// precision.
    pub fn values_are_equivalent(&self, a: u64, b: u64) -> bool {
        self.config.values_are_equivalent(a, b)
    }

    /// Consider `value` as a min/max candidate without touching counts or
    /// `total_count`. Used by the codec to re-establish extrema from the
    /// equivalence range of the lowest/highest occupied index, since a
    /// decoded counts array no longer carries the originally recorded
    /// values.
    pub(crate) fn note_extremum(&self, value: u64) {
        self.counts.update_min_max(value);
    }

    /// Approximate bytes of memory owned by the counts storage.
    pub fn get_memory_footprint(&self) -> usize {
        self.config.footprint_bytes(std::mem::size_of::<u64>())
    }

    /// The arithmetic mean of all recorded values, or `0.0` if empty.
    pub fn mean(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        let mut sum = 0.0f64;
        for index in 0..self.config.counts_len() {
            let count = self.counts.get(index);
            if count == 0 {
                continue;
            }
            let value = self.config.median_equivalent_value(self.config.value_from_flat_index(index));
            sum += value as f64 * count as f64;
        }
        sum / total as f64
    }

    /// The population standard deviation of all recorded values, or `0.0`
    /// if empty.
    pub fn stddev(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let mut sum_of_squares = 0.0f64;
        for index in 0..self.config.counts_len() {
            let count = self.counts.get(index);
            if count == 0 {
                continue;
            }
            let value = self.config.median_equivalent_value(self.config.value_from_flat_index(index));
            let deviation = value as f64 - mean;
            sum_of_squares += deviation * deviation * count as f64;
        }
        (sum_of_squares / total as f64).sqrt()
    }

    /// The value at or above which `percentile` percent of recorded
    /// samples fall, using the highest-equivalent value of the matching
    /// bucket. `percentile` is clamped to `[0, 100]`. Returns `0` if the
    /// histogram is empty.
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        let percentile = percentile.clamp(0.0, 100.0);
        let mut count_at_percentile = ((percentile / 100.0) * total as f64).round() as u64;
        if count_at_percentile == 0 {
            count_at_percentile = 1;
        }
        count_at_percentile = count_at_percentile.min(total);

        let mut running = 0u64;
        for index in 0..self.config.counts_len() {
            running += self.counts.get(index);
            if running >= count_at_percentile {
                let value = self.config.value_from_flat_index(index);
                return self.config.highest_equivalent_value(value);
            }
        }
        self.config.highest_trackable_value()
    }

    /// Iterate every counts-array index, including those with a zero count.
    pub fn iter_all(&self) -> AllValues<'_, C> {
        AllValues::new(self)
    }

    /// Iterate only indices with a non-zero count.
    pub fn iter_recorded(&self) -> RecordedValues<'_, C> {
        RecordedValues::new(self)
    }

    /// Iterate in fixed linear steps of `value_units_per_bucket`.
    pub fn iter_linear(&self, value_units_per_bucket: u64) -> LinearValues<'_, C> {
        LinearValues::new(self, value_units_per_bucket)
    }

    /// Iterate in exponentially growing steps, starting at
    /// `value_units_in_first_bucket` and multiplying by `exponential_base`
    /// each step.
    pub fn iter_log(
        &self,
        value_units_in_first_bucket: u64,
        exponential_base: f64,
    ) -> LogarithmicValues<'_, C> {
        LogarithmicValues::new(self, value_units_in_first_bucket, exponential_base)
    }

    /// Iterate percentiles, taking `ticks_per_half_distance` samples for
    /// each halving of the distance to the 100th percentile.
    pub fn iter_percentiles(&self, ticks_per_half_distance: u32) -> PercentileValues<'_, C> {
        PercentileValues::new(self, ticks_per_half_distance)
    }

    /// Add another histogram's counts into this one. Both histograms must
    /// share the same `Config`.
    pub fn add_assign(&self, other: &Histogram<C>) -> Result<(), HistogramError> {
        if self.config != other.config {
            return Err(HistogramError::IncompatibleConfig);
        }
        for index in 0..self.config.counts_len() {
            let delta = other.counts.get(index);
            if delta != 0 {
                self.counts.add(index, delta);
            }
        }
        self.counts.add_total(other.total_count());
        if other.min() != 0 {
            self.counts.update_min_max(other.min());
        }
        self.counts.update_min_max(other.max());
        Ok(())
    }
}

impl Histogram<PlainCounts> {
    /// Snapshot this histogram's counts into a fresh atomic histogram with
    /// the same geometry. Used to hand a quiesced interval off for
    /// concurrent inspection, or to ingest a decoded histogram.
    pub fn to_atomic(&self) -> Histogram<AtomicCounts> {
        let atomic = Histogram::<AtomicCounts>::from_config(self.config);
        for index in 0..self.config.counts_len() {
            let count = self.counts.get(index);
            if count != 0 {
                atomic.counts.add(index, count);
            }
        }
        atomic.counts.add_total(self.total_count());
        if self.min() != 0 {
            atomic.counts.update_min_max(self.min());
        }
        atomic.counts.update_min_max(self.max());
        atomic
    }
}

impl Histogram<AtomicCounts> {
    /// Snapshot this histogram's counts into a fresh plain histogram with
    /// the same geometry. Intended to be called only once all writers
    /// have quiesced (e.g. after a phaser drain).
    pub fn load(&self) -> Histogram<PlainCounts> {
        let plain = Histogram::<PlainCounts>::from_config(self.config);
        for index in 0..self.config.counts_len() {
            let count = self.counts.get(index);
            if count != 0 {
                plain.counts.add(index, count);
            }
        }
        plain.counts.add_total(self.total_count());
        if self.min() != 0 {
            plain.counts.update_min_max(self.min());
        }
        plain.counts.update_min_max(self.max());
        plain
    }
}

impl<C: CountsBackend> Clone for Histogram<C>
where
    C: CloneCounts,
{
    fn clone(&self) -> Self {
        let clone = Self::from_config(self.config);
        for index in 0..self.config.counts_len() {
            let count = self.counts.get(index);
            if count != 0 {
                clone.counts.add(index, count);
            }
        }
        clone.counts.add_total(self.total_count());
        if self.min() != 0 {
            clone.counts.update_min_max(self.min());
        }
        clone.counts.update_min_max(self.max());
        clone
    }
}

/// Marker used to bound `Histogram::clone` to backends where a
/// snapshot-clone is meaningful (both provided backends qualify).
pub trait CloneCounts: CountsBackend {}
impl CloneCounts for PlainCounts {}
impl CloneCounts for AtomicCounts {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histogram_reads_are_zero() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        assert_eq!(h.total_count(), 0);
        assert_eq!(h.min(), 0);
        assert_eq!(h.max(), 0);
        assert_eq!(h.value_at_percentile(50.0), 0);
        assert_eq!(h.mean(), 0.0);
    }

    #[test]
    fn record_and_read_back() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        assert!(h.record(1000));
        assert_eq!(h.total_count(), 1);
        assert_eq!(h.min(), 1000);
        assert_eq!(h.max(), 1000);
        assert!(h.values_are_equivalent(h.value_at_percentile(100.0), 1000));
    }

    #[test]
    fn rejects_value_above_range() {
        let h = Histogram::<PlainCounts>::new(1, 1000, 3).unwrap();
        assert!(h.record(1000));
        assert!(!h.record(1001));
        assert_eq!(h.total_count(), 1);
    }

    #[test]
    fn percentile_monotonic() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for v in 1..=10_000u64 {
            h.record(v);
        }
        let mut previous = 0;
        for p in [1.0, 10.0, 50.0, 90.0, 99.0, 99.9, 100.0] {
            let value = h.value_at_percentile(p);
            assert!(value >= previous, "percentile {p} regressed");
            previous = value;
        }
    }

    #[test]
    fn scenario_a_coordinated_omission() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        h.record_correct(100_000_000, 10_000);
        assert_eq!(h.total_count(), 20_000);
        assert!(h.values_are_equivalent(h.value_at_percentile(30.0), 1000));
        let p99 = h.value_at_percentile(99.0) as f64;
        assert!((p99 - 98_000_000.0).abs() / 98_000_000.0 < 0.001);
    }

    #[test]
    fn scenario_b_raw_vs_corrected() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        h.record(100_000_000);
        assert_eq!(h.total_count(), 10_001);
        assert!(h.values_are_equivalent(h.value_at_percentile(99.999), 100_000_000));
    }

    #[test]
    fn add_assign_requires_matching_config() {
        let a = Histogram::<PlainCounts>::new(1, 1000, 3).unwrap();
        let b = Histogram::<PlainCounts>::new(1, 2000, 3).unwrap();
        assert_eq!(a.add_assign(&b), Err(HistogramError::IncompatibleConfig));
    }

    #[test]
    fn atomic_histogram_records_concurrently() {
        use std::sync::Arc;
        let h = Arc::new(Histogram::<AtomicCounts>::new(1, 3_600_000_000, 3).unwrap());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let h = Arc::clone(&h);
                scope.spawn(move || {
                    for _ in 0..1000 {
                        h.record(1000);
                    }
                });
            }
        });
        assert_eq!(h.total_count(), 4000);
    }
}
