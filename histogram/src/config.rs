// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::HistogramError;

/// The minimum number of significant decimal digits this crate will
/// preserve across the full trackable range.
pub const MIN_SIGNIFICANT_FIGURES: u8 = 1;
/// The maximum number of significant decimal digits this crate will
/// preserve across the full trackable range.
pub const MAX_SIGNIFICANT_FIGURES: u8 = 5;

/// `Config` holds the parameters that fix a histogram's range and
/// precision, plus the derived geometry used to map a recorded value to
/// its storage index. Two histograms are only directly comparable
/// (mergeable, subtractable) if their `Config`s are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    lowest_discernible_value: u64,
    highest_trackable_value: u64,
    significant_figures: u8,

    unit_magnitude: u32,
    sub_bucket_half_count_magnitude: u32,
    sub_bucket_count: u32,
    sub_bucket_half_count: u32,
    sub_bucket_mask: u64,
    bucket_count: u32,
    counts_len: usize,
}

impl Config {
    /// Build the derived geometry for a new histogram. `lowest_discernible_value`
    /// must be at least 1, `highest_trackable_value` must be at least twice
    /// `lowest_discernible_value`, and `significant_figures` must fall in
    /// `1..=5`.
    pub fn new(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
    ) -> Result<Self, HistogramError> {
        if lowest_discernible_value < 1 {
            return Err(HistogramError::InvalidArgument(
                "lowest_discernible_value must be >= 1",
            ));
        }
        if !(MIN_SIGNIFICANT_FIGURES..=MAX_SIGNIFICANT_FIGURES).contains(&significant_figures) {
            return Err(HistogramError::InvalidArgument(
                "significant_figures must be within 1..=5",
            ));
        }
        if highest_trackable_value < lowest_discernible_value.saturating_mul(2) {
            return Err(HistogramError::InvalidArgument(
                "highest_trackable_value must be >= 2 * lowest_discernible_value",
            ));
        }

        let unit_magnitude = (lowest_discernible_value as f64).log2().floor() as u32;

        let largest_value_with_single_unit_resolution =
            2.0 * 10f64.powi(significant_figures as i32);
        let sub_bucket_count_magnitude =
            (largest_value_with_single_unit_resolution.log2()).ceil() as u32;
        let sub_bucket_half_count_magnitude = sub_bucket_count_magnitude.max(1) - 1;
        let sub_bucket_count = 1u32 << (sub_bucket_half_count_magnitude + 1);
        let sub_bucket_half_count = sub_bucket_count / 2;
        let sub_bucket_mask = ((sub_bucket_count as u64) - 1) << unit_magnitude;

        let mut bucket_count = 1u32;
        let mut smallest_untrackable_value =
            (sub_bucket_count as u64) << unit_magnitude;
        while smallest_untrackable_value <= highest_trackable_value {
            if smallest_untrackable_value > u64::MAX / 2 {
                bucket_count += 1;
                break;
            }
            smallest_untrackable_value <<= 1;
            bucket_count += 1;
        }

        let counts_len = ((bucket_count + 1) * sub_bucket_half_count) as usize;

        Ok(Config {
            lowest_discernible_value,
            highest_trackable_value,
            significant_figures,
            unit_magnitude,
            sub_bucket_half_count_magnitude,
            sub_bucket_count,
            sub_bucket_half_count,
            sub_bucket_mask,
            bucket_count,
            counts_len,
        })
    }

    /// The configured lower bound of the trackable range.
    pub fn lowest_discernible_value(&self) -> u64 {
        self.lowest_discernible_value
    }

    /// The configured upper bound of the trackable range.
    pub fn highest_trackable_value(&self) -> u64 {
        self.highest_trackable_value
    }

    /// The configured number of significant decimal digits.
    pub fn significant_figures(&self) -> u8 {
        self.significant_figures
    }

    /// The number of storage slots backing this configuration.
    pub fn counts_len(&self) -> usize {
        self.counts_len
    }

    /// The number of exponential buckets.
    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    /// The number of sub-buckets stored per bucket (excluding the halved
    /// buckets beyond bucket zero).
    pub fn sub_bucket_count(&self) -> u32 {
        self.sub_bucket_count
    }

    fn bucket_index_raw(&self, value: u64) -> i32 {
        let value = value | self.sub_bucket_mask;
        let leading_zeros = value.leading_zeros() as i32;
        64 - leading_zeros - (self.sub_bucket_half_count_magnitude as i32 + 1 + self.unit_magnitude as i32)
    }

    fn sub_bucket_index(&self, value: u64, bucket_index: i32) -> u32 {
        (value >> (bucket_index as u32 + self.unit_magnitude)) as u32
    }

    /// Returns `None` if `value` cannot be represented (negative in the
    /// caller's domain, or above the trackable range).
    pub fn counts_index(&self, value: u64) -> Option<usize> {
        if value > self.highest_trackable_value {
            return None;
        }
        let bucket_index = self.bucket_index_raw(value);
        let bucket_index = if bucket_index < 0 { 0 } else { bucket_index };
        let sub_bucket_index = self.sub_bucket_index(value, bucket_index);
        Some(self.counts_array_index(bucket_index as u32, sub_bucket_index))
    }

    fn counts_array_index(&self, bucket_index: u32, sub_bucket_index: u32) -> usize {
        let bucket_base_index =
            ((bucket_index + 1) << self.sub_bucket_half_count_magnitude) as i64;
        let offset_in_bucket = sub_bucket_index as i64 - self.sub_bucket_half_count as i64;
        (bucket_base_index + offset_in_bucket) as usize
    }

    /// Recovers `(bucket_index, sub_bucket_index)` from a flat counts index.
    pub fn index_to_bucket(&self, index: usize) -> (u32, u32) {
        let index = index as i64;
        let sub_bucket_half_count_magnitude = self.sub_bucket_half_count_magnitude as i64;
        let bucket_index = (index >> sub_bucket_half_count_magnitude) - 1;
        let sub_bucket_index =
            (index - ((bucket_index + 1) << sub_bucket_half_count_magnitude))
                + self.sub_bucket_half_count as i64;
        if bucket_index < 0 {
            (0, sub_bucket_index as u32)
        } else {
            (bucket_index as u32, sub_bucket_index as u32)
        }
    }

    /// The smallest value represented by `(bucket_index, sub_bucket_index)`.
    pub fn value_from_index(&self, bucket_index: u32, sub_bucket_index: u32) -> u64 {
        (sub_bucket_index as u64) << (bucket_index + self.unit_magnitude)
    }

    /// The value represented at a flat counts index.
    pub fn value_from_flat_index(&self, index: usize) -> u64 {
        let (bucket_index, sub_bucket_index) = self.index_to_bucket(index);
        self.value_from_index(bucket_index, sub_bucket_index)
    }

    /// The width, in raw value units, of the equivalence range containing `value`.
    pub fn size_of_equivalent_range(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_index_raw(value).max(0) as u32;
        let sub_bucket_index = self.sub_bucket_index(value, bucket_index as i32);
        let adjusted_bucket = if sub_bucket_index >= self.sub_bucket_count {
            bucket_index + 1
        } else {
            bucket_index
        };
        1u64 << (adjusted_bucket + self.unit_magnitude)
    }

    /// The lowest value equivalent to (indistinguishable from) `value`.
    pub fn lowest_equivalent_value(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_index_raw(value).max(0) as u32;
        let sub_bucket_index = self.sub_bucket_index(value, bucket_index as i32);
        self.value_from_index(bucket_index, sub_bucket_index)
    }

    /// The first value above `value`'s equivalence range.
    pub fn next_non_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value) + self.size_of_equivalent_range(value)
    }

    /// The highest value equivalent to (indistinguishable from) `value`.
    pub fn highest_equivalent_value(&self, value: u64) -> u64 {
        self.next_non_equivalent_value(value) - 1
    }

    /// The midpoint of `value`'s equivalence range.
    pub fn median_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value) + (self.size_of_equivalent_range(value) >> 1)
    }

    /// Whether `a` and `b` fall in the same equivalence range.
    pub fn values_are_equivalent(&self, a: u64, b: u64) -> bool {
        self.lowest_equivalent_value(a) == self.lowest_equivalent_value(b)
    }

    /// Bytes of memory consumed by a counts array of this configuration
    /// (the caller's word width determines the multiplier).
    pub fn footprint_bytes(&self, bytes_per_count: usize) -> usize {
        self.counts_len * bytes_per_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_arguments() {
        assert!(Config::new(0, 100, 3).is_err());
        assert!(Config::new(1, 1, 3).is_err());
        assert!(Config::new(1, 100, 0).is_err());
        assert!(Config::new(1, 100, 6).is_err());
        assert!(Config::new(1, 3_600_000_000, 3).is_ok());
    }

    #[test]
    fn index_round_trip() {
        let config = Config::new(1, 3_600_000_000, 3).unwrap();
        for value in [0u64, 1, 2, 100, 1000, 999_999, 1_000_000, 3_599_999_999] {
            let index = config.counts_index(value).unwrap();
            let reconstructed = config.value_from_flat_index(index);
            assert_eq!(
                config.lowest_equivalent_value(reconstructed),
                config.lowest_equivalent_value(value),
                "value={value} index={index}"
            );
        }
    }

    #[test]
    fn equivalence_round_trip() {
        let config = Config::new(1, 3_600_000_000, 3).unwrap();
        for value in [1u64, 100, 100_000, 2_000_000, 3_599_999_999] {
            let highest = config.highest_equivalent_value(value);
            assert_eq!(
                config.lowest_equivalent_value(highest),
                config.lowest_equivalent_value(value)
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        let config = Config::new(1, 1000, 3).unwrap();
        assert!(config.counts_index(1001).is_none());
        assert!(config.counts_index(1000).is_some());
    }

    #[test]
    fn counts_len_matches_reference_geometry() {
        // sig figs 3 over a ~1-hour-in-ns range is the value used throughout
        // the upstream reference implementation's own test suite.
        let config = Config::new(1, 3_600_000_000_000, 3).unwrap();
        assert!(config.counts_len() > 0);
        assert_eq!(config.sub_bucket_count(), 2048);
    }
}
