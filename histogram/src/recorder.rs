// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A double-buffered histogram pair coordinated by a [`Phaser`], letting a
//! sampler periodically take a quiesced snapshot of recent activity
//! without ever blocking concurrent recorders.

use std::cell::UnsafeCell;

use crate::clock::{Sleep, ThreadSleep};
use crate::counts::AtomicCounts;
use crate::error::HistogramError;
use crate::histogram::Histogram;
use crate::phaser::{Phaser, YieldStrategy};

/// Holds two atomic histograms of identical geometry, `active` and
/// `inactive`, and swaps between them under [`IntervalRecorder::sample`].
///
/// Recorders call [`IntervalRecorder::record`] (or [`IntervalRecorder::update`]
/// for custom recording logic); these are wait-free and may run
/// concurrently with each other and, crucially, with a `sample()` call in
/// progress on another thread.
pub struct IntervalRecorder<S: Sleep = ThreadSleep> {
    phaser: Phaser,
    // index 0/1 select which of the two histograms is active; flipped
    // under the reader mutex inside `phaser`, so the swap itself is only
    // ever observed by one thread at a time.
    histograms: [UnsafeCell<Histogram<AtomicCounts>>; 2],
    active: std::sync::atomic::AtomicUsize,
    sleep: S,
}

// SAFETY: access to `histograms[i]` is only ever taken through `active`,
// which is only flipped while holding the phaser's reader mutex, and all
// writer access happens strictly between a `writer_enter`/`writer_exit`
// pair whose exit the flip waits to observe before the pointer is
// considered safe to hand to the caller.
unsafe impl<S: Sleep + Send> Sync for IntervalRecorder<S> {}

impl IntervalRecorder<ThreadSleep> {
    /// Construct a new recorder with two histograms of the given geometry.
    pub fn new(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
    ) -> Result<Self, HistogramError> {
        Self::with_sleep(
            lowest_discernible_value,
            highest_trackable_value,
            significant_figures,
            ThreadSleep,
        )
    }
}

impl<S: Sleep> IntervalRecorder<S> {
    /// Construct a new recorder, injecting the [`Sleep`] implementation
    /// used by the phaser's drain wait (primarily useful in tests).
    pub fn with_sleep(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
        sleep: S,
    ) -> Result<Self, HistogramError> {
        let active = Histogram::<AtomicCounts>::new(
            lowest_discernible_value,
            highest_trackable_value,
            significant_figures,
        )?;
        let inactive = Histogram::<AtomicCounts>::new(
            lowest_discernible_value,
            highest_trackable_value,
            significant_figures,
        )?;
        Ok(IntervalRecorder {
            phaser: Phaser::new(),
            histograms: [UnsafeCell::new(active), UnsafeCell::new(inactive)],
            active: std::sync::atomic::AtomicUsize::new(0),
            sleep,
        })
    }

    fn active_histogram(&self) -> &Histogram<AtomicCounts> {
        let index = self.active.load(std::sync::atomic::Ordering::Acquire);
        // SAFETY: see the `Sync` impl above.
        unsafe { &*self.histograms[index].get() }
    }

    /// Record a single occurrence of `value` into the active histogram.
    /// Wait-free; safe to call from any number of threads concurrently.
    pub fn record(&self, value: u64) -> bool {
        self.update(|histogram| histogram.record(value))
    }

    /// Run an arbitrary recording closure against the active histogram,
    /// bracketed by a phaser writer section. Use this for
    /// `record_correct` or batched recording.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Histogram<AtomicCounts>) -> R,
    {
        let token = self.phaser.writer_enter();
        let result = f(self.active_histogram());
        self.phaser.writer_exit(token);
        result
    }

    /// Swap the active and inactive histograms, waiting for any writers
    /// caught mid-flight in the outgoing phase to finish, then return a
    /// plain, quiesced snapshot of what was active (now reset so it may
    /// be handed back in as the next `inactive`, or dropped by the caller).
    pub fn sample(&self) -> Histogram<crate::counts::PlainCounts> {
        let previous_active = self.active.load(std::sync::atomic::Ordering::Acquire);
        let next_active = 1 - previous_active;
        self.active
            .store(next_active, std::sync::atomic::Ordering::Release);
        self.phaser.flip_phase(YieldStrategy::Spin, &self.sleep);

        // SAFETY: the flip above guarantees every writer that observed
        // `previous_active` has exited, so no concurrent access remains.
        let quiesced = unsafe { &*self.histograms[previous_active].get() };
        let snapshot = quiesced.load();
        quiesced.reset();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::NoopSleep;

    #[test]
    fn sample_returns_recorded_values_and_resets() {
        let recorder =
            IntervalRecorder::with_sleep(1, 3_600_000_000, 3, NoopSleep).unwrap();
        for _ in 0..100 {
            recorder.record(1000);
        }
        let snapshot = recorder.sample();
        assert_eq!(snapshot.total_count(), 100);

        recorder.record(2000);
        let second = recorder.sample();
        assert_eq!(second.total_count(), 1);
    }

    #[test]
    fn concurrent_recording_survives_sampling() {
        use std::sync::Arc;
        let recorder = Arc::new(
            IntervalRecorder::with_sleep(1, 3_600_000_000, 3, NoopSleep).unwrap(),
        );
        let mut total_sampled = 0u64;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let recorder = Arc::clone(&recorder);
                    scope.spawn(move || {
                        for _ in 0..5000 {
                            recorder.record(1000);
                        }
                    })
                })
                .collect();

            // sample repeatedly while writers are active
            while !handles.iter().all(|h| h.is_finished()) {
                total_sampled += recorder.sample().total_count();
            }
            for handle in handles {
                handle.join().unwrap();
            }
        });
        // one last sample to catch anything recorded after the last loop check
        total_sampled += recorder.sample().total_count();
        assert_eq!(total_sampled, 20_000);
    }
}
