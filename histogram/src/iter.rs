// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Iterators over a histogram's recorded counts.
//!
//! Every iterator here wraps a shared [`Cursor`] that walks the flat
//! counts array and tracks running totals; the different iteration
//! strategies (all values, recorded-only, linear step, logarithmic step,
//! percentile) are thin wrappers composed around that cursor rather than
//! separate implementations of the underlying bookkeeping.

use crate::counts::CountsBackend;
use crate::histogram::Histogram;

/// One step of iteration over a histogram: the value represented,
/// the count freshly added at this step, and the running totals so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountsAtValue {
    /// The highest-equivalent value for this step.
    pub value: u64,
    /// The count contributed by this step alone.
    pub count_added_in_this_step: u64,
    /// The cumulative count of samples at or below `value`, across the
    /// whole walk so far.
    pub count_to_value: u64,
    /// The raw counts-array index this step ended on.
    pub index: usize,
}

struct Cursor<'h, C> {
    histogram: &'h Histogram<C>,
    index: usize,
    count_to_index: u64,
    total_count: u64,
}

impl<'h, C: CountsBackend> Cursor<'h, C> {
    fn new(histogram: &'h Histogram<C>) -> Self {
        Cursor {
            histogram,
            index: 0,
            count_to_index: 0,
            total_count: histogram.total_count(),
        }
    }

    /// Advance one counts-array slot; returns the count observed at that
    /// slot, or `None` once every slot has been visited.
    fn advance(&mut self) -> Option<(usize, u64)> {
        if self.index >= self.histogram.config().counts_len() {
            return None;
        }
        let count = self.histogram.count_at_index(self.index);
        self.count_to_index += count;
        let result = (self.index, count);
        self.index += 1;
        Some(result)
    }

    fn done(&self) -> bool {
        self.count_to_index >= self.total_count && self.total_count > 0
            || self.index >= self.histogram.config().counts_len()
    }
}

/// Iterates every counts-array index, including those with a zero count.
pub struct AllValues<'h, C> {
    cursor: Cursor<'h, C>,
}

impl<'h, C: CountsBackend> AllValues<'h, C> {
    pub(crate) fn new(histogram: &'h Histogram<C>) -> Self {
        AllValues {
            cursor: Cursor::new(histogram),
        }
    }
}

impl<'h, C: CountsBackend> Iterator for AllValues<'h, C> {
    type Item = CountsAtValue;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, count) = self.cursor.advance()?;
        let value = self.cursor.histogram.config().value_from_flat_index(index);
        Some(CountsAtValue {
            value: self.cursor.histogram.config().highest_equivalent_value(value),
            count_added_in_this_step: count,
            count_to_value: self.cursor.count_to_index,
            index,
        })
    }
}

/// Iterates only the counts-array indices with a non-zero count.
pub struct RecordedValues<'h, C> {
    cursor: Cursor<'h, C>,
}

impl<'h, C: CountsBackend> RecordedValues<'h, C> {
    pub(crate) fn new(histogram: &'h Histogram<C>) -> Self {
        RecordedValues {
            cursor: Cursor::new(histogram),
        }
    }
}

impl<'h, C: CountsBackend> Iterator for RecordedValues<'h, C> {
    type Item = CountsAtValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, count) = self.cursor.advance()?;
            if count == 0 {
                continue;
            }
            let value = self.cursor.histogram.config().value_from_flat_index(index);
            return Some(CountsAtValue {
                value: self.cursor.histogram.config().highest_equivalent_value(value),
                count_added_in_this_step: count,
                count_to_value: self.cursor.count_to_index,
                index,
            });
        }
    }
}

/// Iterates in fixed-size linear steps of `value_units_per_bucket`.
pub struct LinearValues<'h, C> {
    cursor: Cursor<'h, C>,
    value_units_per_bucket: u64,
    next_reporting_level: u64,
    count_added_in_this_step: u64,
    finished: bool,
}

impl<'h, C: CountsBackend> LinearValues<'h, C> {
    pub(crate) fn new(histogram: &'h Histogram<C>, value_units_per_bucket: u64) -> Self {
        LinearValues {
            cursor: Cursor::new(histogram),
            value_units_per_bucket: value_units_per_bucket.max(1),
            next_reporting_level: value_units_per_bucket.max(1),
            count_added_in_this_step: 0,
            finished: false,
        }
    }
}

impl<'h, C: CountsBackend> Iterator for LinearValues<'h, C> {
    type Item = CountsAtValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let config = self.cursor.histogram.config();
            if self.cursor.index >= config.counts_len() {
                if self.cursor.total_count == 0 {
                    self.finished = true;
                    return None;
                }
                self.finished = true;
                let count = self.count_added_in_this_step;
                self.count_added_in_this_step = 0;
                return Some(CountsAtValue {
                    value: self.next_reporting_level - 1,
                    count_added_in_this_step: count,
                    count_to_value: self.cursor.count_to_index,
                    index: config.counts_len().saturating_sub(1),
                });
            }
            let value = config.value_from_flat_index(self.cursor.index);
            let highest = config.highest_equivalent_value(value);

            // An index whose equivalence range extends past the current
            // reporting level does not belong to it; emit the level as-is
            // and re-examine this same index against the next level,
            // rather than consuming it (and silently skipping any
            // intervening empty levels it spans) here.
            if highest >= self.next_reporting_level {
                let reported_value = self.next_reporting_level - 1;
                let step_count = self.count_added_in_this_step;
                self.next_reporting_level += self.value_units_per_bucket;
                self.count_added_in_this_step = 0;
                if self.cursor.count_to_index >= self.cursor.total_count
                    && self.cursor.total_count > 0
                {
                    self.finished = true;
                }
                return Some(CountsAtValue {
                    value: reported_value,
                    count_added_in_this_step: step_count,
                    count_to_value: self.cursor.count_to_index,
                    index: self.cursor.index.saturating_sub(1),
                });
            }

            let count = self.cursor.histogram.count_at_index(self.cursor.index);
            self.cursor.count_to_index += count;
            self.cursor.index += 1;
            self.count_added_in_this_step += count;
        }
    }
}

/// Iterates in exponentially growing steps starting at
/// `value_units_in_first_bucket`, multiplying by `exponential_base` after
/// each step.
pub struct LogarithmicValues<'h, C> {
    cursor: Cursor<'h, C>,
    exponential_base: f64,
    next_reporting_level: f64,
    count_added_in_this_step: u64,
    finished: bool,
}

impl<'h, C: CountsBackend> LogarithmicValues<'h, C> {
    pub(crate) fn new(
        histogram: &'h Histogram<C>,
        value_units_in_first_bucket: u64,
        exponential_base: f64,
    ) -> Self {
        LogarithmicValues {
            cursor: Cursor::new(histogram),
            exponential_base: exponential_base.max(1.000001),
            next_reporting_level: value_units_in_first_bucket.max(1) as f64,
            count_added_in_this_step: 0,
            finished: false,
        }
    }
}

impl<'h, C: CountsBackend> Iterator for LogarithmicValues<'h, C> {
    type Item = CountsAtValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let config = self.cursor.histogram.config();
            if self.cursor.index >= config.counts_len() {
                self.finished = true;
                if self.cursor.total_count == 0 {
                    return None;
                }
                let count = self.count_added_in_this_step;
                self.count_added_in_this_step = 0;
                return Some(CountsAtValue {
                    value: self.next_reporting_level as u64 - 1,
                    count_added_in_this_step: count,
                    count_to_value: self.cursor.count_to_index,
                    index: config.counts_len().saturating_sub(1),
                });
            }
            let value = config.value_from_flat_index(self.cursor.index);
            let highest = config.highest_equivalent_value(value);

            if highest as f64 >= self.next_reporting_level {
                let reported_value = self.next_reporting_level as u64 - 1;
                let step_count = self.count_added_in_this_step;
                self.next_reporting_level *= self.exponential_base;
                self.count_added_in_this_step = 0;
                if self.cursor.count_to_index >= self.cursor.total_count
                    && self.cursor.total_count > 0
                {
                    self.finished = true;
                }
                return Some(CountsAtValue {
                    value: reported_value,
                    count_added_in_this_step: step_count,
                    count_to_value: self.cursor.count_to_index,
                    index: self.cursor.index.saturating_sub(1),
                });
            }

            let count = self.cursor.histogram.count_at_index(self.cursor.index);
            self.cursor.count_to_index += count;
            self.cursor.index += 1;
            self.count_added_in_this_step += count;
        }
    }
}

/// A single percentile sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentileAtValue {
    /// The highest-equivalent value reached by this percentile.
    pub value: u64,
    /// The percentile in `[0.0, 100.0]`.
    pub percentile: f64,
    /// Cumulative count of samples at or below `value`.
    pub count_to_value: u64,
    /// Total samples in the histogram.
    pub total_count: u64,
}

/// Iterates increasingly fine-grained percentiles, approaching 100 with
/// `ticks_per_half_distance` samples per halving of the remaining
/// distance.
pub struct PercentileValues<'h, C> {
    cursor: Cursor<'h, C>,
    ticks_per_half_distance: u32,
    percentile_to_iterate_to: f64,
    reached_last_recorded_value: bool,
}

impl<'h, C: CountsBackend> PercentileValues<'h, C> {
    pub(crate) fn new(histogram: &'h Histogram<C>, ticks_per_half_distance: u32) -> Self {
        PercentileValues {
            cursor: Cursor::new(histogram),
            ticks_per_half_distance: ticks_per_half_distance.max(1),
            percentile_to_iterate_to: 0.0,
            reached_last_recorded_value: false,
        }
    }

    fn next_increment(&self) -> f64 {
        if self.percentile_to_iterate_to >= 100.0 {
            return 0.0;
        }
        let percentile_remaining = 100.0 - self.percentile_to_iterate_to;
        let half_distance = (100.0 / percentile_remaining).log2().ceil();
        let ticks = (self.ticks_per_half_distance as f64) * 2f64.powf(half_distance.max(0.0));
        100.0 / ticks
    }
}

impl<'h, C: CountsBackend> Iterator for PercentileValues<'h, C> {
    type Item = PercentileAtValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.total_count == 0 {
            return None;
        }
        if self.reached_last_recorded_value {
            return None;
        }
        loop {
            if self.cursor.count_to_index >= self.cursor.total_count {
                self.reached_last_recorded_value = true;
                let config = self.cursor.histogram.config();
                let last_index = self.cursor.index.saturating_sub(1).min(config.counts_len() - 1);
                let value = config.value_from_flat_index(last_index);
                return Some(PercentileAtValue {
                    value: config.highest_equivalent_value(value),
                    percentile: 100.0,
                    count_to_value: self.cursor.count_to_index,
                    total_count: self.cursor.total_count,
                });
            }
            let (index, _count) = self.cursor.advance()?;
            let current_percentile =
                100.0 * self.cursor.count_to_index as f64 / self.cursor.total_count as f64;
            if current_percentile >= self.percentile_to_iterate_to || self.cursor.done() {
                let config = self.cursor.histogram.config();
                let value = config.value_from_flat_index(index);
                let reported_percentile = self.percentile_to_iterate_to.min(100.0);
                let step = self.next_increment();
                self.percentile_to_iterate_to = (self.percentile_to_iterate_to + step).min(100.0);
                if self.cursor.count_to_index >= self.cursor.total_count {
                    self.reached_last_recorded_value = true;
                }
                return Some(PercentileAtValue {
                    value: config.highest_equivalent_value(value),
                    percentile: if reported_percentile == 0.0 {
                        current_percentile.min(100.0)
                    } else {
                        reported_percentile
                    },
                    count_to_value: self.cursor.count_to_index,
                    total_count: self.cursor.total_count,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::counts::PlainCounts;
    use crate::histogram::Histogram;

    #[test]
    fn recorded_values_sums_to_total() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        h.record_correct(100_000_000, 10_000);
        let sum: u64 = h.iter_recorded().map(|s| s.count_added_in_this_step).sum();
        assert_eq!(sum, 20_000);
        let mut iter = h.iter_recorded();
        let first = iter.next().unwrap();
        assert_eq!(first.count_added_in_this_step, 10_000);
    }

    #[test]
    fn linear_iterator_step_counts() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        h.record(100_000_000);
        let steps: Vec<_> = h.iter_linear(100_000).collect();
        assert_eq!(steps.len(), 1000);
        assert_eq!(steps[0].count_added_in_this_step, 10_000);
        assert_eq!(steps[999].count_added_in_this_step, 1);
    }

    #[test]
    fn percentile_iterator_reaches_100() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for v in 1..=1000u64 {
            h.record(v);
        }
        let last = h.iter_percentiles(4).last().unwrap();
        assert_eq!(last.percentile, 100.0);
    }

    #[test]
    fn all_values_visits_every_index() {
        let h = Histogram::<PlainCounts>::new(1, 1000, 2).unwrap();
        let count = h.iter_all().count();
        assert_eq!(count, h.config().counts_len());
    }
}
