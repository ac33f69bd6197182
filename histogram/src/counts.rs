// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Storage policies for the counts array backing a `Histogram`.
//!
//! A histogram is generic over its counts backend so that the same
//! bucket-geometry and iteration code works whether or not the counts are
//! shared across threads. Dispatch between the two policies is static
//! (a generic parameter), never through a function pointer or trait
//! object, per the design notes this crate follows.

use rustcommon_atomics::{Arithmetic, Atomic, FetchCompareStore, Ordering};

/// A storage policy for histogram counts, minimums, and maximums.
///
/// Implementations must be safe to share behind `&self` — the atomic
/// backend relies on interior mutability, while the plain backend is only
/// ever used from a single owner and so does not need it, but both must
/// expose the same read/write surface.
pub trait CountsBackend {
    /// Allocate a zeroed backend with `len` slots.
    fn with_len(len: usize) -> Self;

    /// Number of slots.
    fn len(&self) -> usize;

    /// Whether there are zero slots (always false for a constructed histogram).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the count at `index`.
    fn get(&self, index: usize) -> u64;

    /// Add `delta` to the count at `index`, returning the new total count
    /// delta that should be reflected in `total_count`.
    fn add(&self, index: usize, delta: u64);

    /// Zero every slot.
    fn clear(&self);

    /// Current `total_count`.
    fn total(&self) -> u64;

    /// Add to `total_count`.
    fn add_total(&self, delta: u64);

    /// Reset `total_count` to zero.
    fn clear_total(&self);

    /// Current observed minimum non-zero value, or `u64::MAX` if none recorded.
    fn min(&self) -> u64;

    /// Current observed maximum value, or `0` if none recorded.
    fn max(&self) -> u64;

    /// Record that `value` was observed, updating min/max as needed.
    fn update_min_max(&self, value: u64);

    /// Reset min/max to their empty-histogram sentinels.
    fn clear_min_max(&self);
}

/// A single-threaded, non-atomic counts backend. Used by `Histogram<PlainCounts>`.
#[derive(Clone)]
pub struct PlainCounts {
    counts: Vec<std::cell::Cell<u64>>,
    total_count: std::cell::Cell<u64>,
    min_value: std::cell::Cell<u64>,
    max_value: std::cell::Cell<u64>,
}

impl CountsBackend for PlainCounts {
    fn with_len(len: usize) -> Self {
        PlainCounts {
            counts: (0..len).map(|_| std::cell::Cell::new(0)).collect(),
            total_count: std::cell::Cell::new(0),
            min_value: std::cell::Cell::new(u64::MAX),
            max_value: std::cell::Cell::new(0),
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn get(&self, index: usize) -> u64 {
        self.counts[index].get()
    }

    fn add(&self, index: usize, delta: u64) {
        let cell = &self.counts[index];
        cell.set(cell.get().saturating_add(delta));
    }

    fn clear(&self) {
        for cell in &self.counts {
            cell.set(0);
        }
    }

    fn total(&self) -> u64 {
        self.total_count.get()
    }

    fn add_total(&self, delta: u64) {
        self.total_count.set(self.total_count.get().saturating_add(delta));
    }

    fn clear_total(&self) {
        self.total_count.set(0);
    }

    fn min(&self) -> u64 {
        self.min_value.get()
    }

    fn max(&self) -> u64 {
        self.max_value.get()
    }

    fn update_min_max(&self, value: u64) {
        if value > 0 && value < self.min_value.get() {
            self.min_value.set(value);
        }
        if value > self.max_value.get() {
            self.max_value.set(value);
        }
    }

    fn clear_min_max(&self) {
        self.min_value.set(u64::MAX);
        self.max_value.set(0);
    }
}

/// A lock-free counts backend built on the crate's atomics substrate.
/// Used by `Histogram<AtomicCounts>` for concurrent recording.
pub struct AtomicCounts {
    counts: Vec<rustcommon_atomics::AtomicU64>,
    total_count: rustcommon_atomics::AtomicU64,
    min_value: rustcommon_atomics::AtomicU64,
    max_value: rustcommon_atomics::AtomicU64,
}

impl CountsBackend for AtomicCounts {
    fn with_len(len: usize) -> Self {
        AtomicCounts {
            counts: (0..len)
                .map(|_| rustcommon_atomics::AtomicU64::new(0))
                .collect(),
            total_count: rustcommon_atomics::AtomicU64::new(0),
            min_value: rustcommon_atomics::AtomicU64::new(u64::MAX),
            max_value: rustcommon_atomics::AtomicU64::new(0),
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn get(&self, index: usize) -> u64 {
        self.counts[index].load(Ordering::SeqCst)
    }

    fn add(&self, index: usize, delta: u64) {
        self.counts[index].fetch_add(delta, Ordering::SeqCst);
    }

    fn clear(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::SeqCst);
        }
    }

    fn total(&self) -> u64 {
        self.total_count.load(Ordering::SeqCst)
    }

    fn add_total(&self, delta: u64) {
        self.total_count.fetch_add(delta, Ordering::SeqCst);
    }

    fn clear_total(&self) {
        self.total_count.store(0, Ordering::SeqCst);
    }

    fn min(&self) -> u64 {
        self.min_value.load(Ordering::SeqCst)
    }

    fn max(&self) -> u64 {
        self.max_value.load(Ordering::SeqCst)
    }

    fn update_min_max(&self, value: u64) {
        if value > 0 {
            // retry until our value is no longer smaller than the observed minimum
            let mut current = self.min_value.load(Ordering::SeqCst);
            while value < current {
                match self
                    .min_value
                    .compare_exchange_weak(current, value, Ordering::SeqCst, Ordering::SeqCst)
                {
                    Ok(_) => break,
                    Err(actual) => current = actual,
                }
            }
        }
        self.max_value.fetch_max(value, Ordering::SeqCst);
    }

    fn clear_min_max(&self) {
        self.min_value.store(u64::MAX, Ordering::SeqCst);
        self.max_value.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_counts_basic() {
        let backend = PlainCounts::with_len(4);
        backend.add(0, 3);
        backend.add(0, 1);
        assert_eq!(backend.get(0), 4);
        backend.update_min_max(10);
        backend.update_min_max(2);
        assert_eq!(backend.min(), 2);
        assert_eq!(backend.max(), 10);
    }

    #[test]
    fn atomic_counts_basic() {
        let backend = AtomicCounts::with_len(4);
        backend.add(1, 5);
        assert_eq!(backend.get(1), 5);
        backend.update_min_max(7);
        backend.update_min_max(20);
        backend.update_min_max(3);
        assert_eq!(backend.min(), 3);
        assert_eq!(backend.max(), 20);
    }
}
