// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A writer/reader phaser: a coordination primitive that lets many writer
//! threads proceed without blocking while a single sampler thread flips
//! between two phases and waits only for the writers caught mid-flight by
//! the flip.

use std::sync::Mutex;
use std::time::Duration;

use rustcommon_atomics::{Arithmetic, Atomic, AtomicI64, Ordering};

use crate::clock::Sleep;

/// How a reader should wait for outstanding writers to drain during a
/// phase flip. Passing a zero-duration sleep selects a pure spin-yield.
#[derive(Clone, Copy, Debug)]
pub enum YieldStrategy {
    /// Busy-spin, yielding the hardware thread between checks.
    Spin,
    /// Sleep for the given duration between checks.
    Sleep(Duration),
}

impl YieldStrategy {
    fn wait_once<S: Sleep>(&self, sleep: &S) {
        match self {
            YieldStrategy::Spin => std::hint::spin_loop(),
            YieldStrategy::Sleep(duration) if duration.is_zero() => std::hint::spin_loop(),
            YieldStrategy::Sleep(duration) => sleep.sleep(*duration),
        }
    }
}

/// A writer/reader phaser.
///
/// Writers call [`Phaser::writer_enter`] before touching shared state and
/// [`Phaser::writer_exit`] with the returned token afterward; both
/// operations are a single atomic fetch-add and never block. A reader
/// (there must be at most one active at a time, enforced by
/// `reader_mutex`) calls [`Phaser::flip_phase`] to swap the active phase
/// and wait until every writer that had already entered the old phase has
/// exited.
pub struct Phaser {
    start_epoch: AtomicI64,
    even_end_epoch: AtomicI64,
    odd_end_epoch: AtomicI64,
    reader_mutex: Mutex<()>,
}

/// A token returned by [`Phaser::writer_enter`]; must be passed back to
/// the matching [`Phaser::writer_exit`].
#[derive(Clone, Copy, Debug)]
pub struct WriterToken(i64);

impl Default for Phaser {
    fn default() -> Self {
        Self::new()
    }
}

impl Phaser {
    /// Construct a new phaser in the even phase.
    pub fn new() -> Self {
        Phaser {
            start_epoch: AtomicI64::new(0),
            even_end_epoch: AtomicI64::new(0),
            odd_end_epoch: AtomicI64::new(i64::MIN),
            reader_mutex: Mutex::new(()),
        }
    }

    /// Enter a writer critical section. Wait-free, never blocks.
    #[inline]
    pub fn writer_enter(&self) -> WriterToken {
        WriterToken(self.start_epoch.fetch_add(1, Ordering::AcqRel))
    }

    /// Exit the writer critical section opened by the matching
    /// [`Phaser::writer_enter`] call.
    #[inline]
    pub fn writer_exit(&self, token: WriterToken) {
        if token.0 < 0 {
            self.odd_end_epoch.fetch_add(1, Ordering::AcqRel);
        } else {
            self.even_end_epoch.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Flip the active phase and wait for every writer caught in the old
    /// phase to exit. Only one flip may be in progress at a time; this
    /// blocks on an internal mutex if another flip is already underway.
    pub fn flip_phase<S: Sleep>(&self, yield_strategy: YieldStrategy, sleep: &S) {
        let _guard = self.reader_mutex.lock().unwrap_or_else(|e| e.into_inner());

        let start_value = self.start_epoch.load(Ordering::Acquire);
        let next_phase_is_even = start_value < 0;

        // Reset the incoming phase's end-epoch to its empty sentinel
        // before publishing the flip, so writers entering after the flip
        // accumulate from a clean slate.
        if next_phase_is_even {
            self.even_end_epoch.store(0, Ordering::Release);
        } else {
            self.odd_end_epoch.store(i64::MIN, Ordering::Release);
        }

        // Publish the flip: new writers now land in the other phase.
        let previous_start_value = self
            .start_epoch
            .swap(if next_phase_is_even { 0 } else { i64::MIN }, Ordering::AcqRel);

        // Wait for every writer that entered under the outgoing phase to exit.
        let outgoing_was_even = previous_start_value >= 0;
        loop {
            let drained = if outgoing_was_even {
                self.even_end_epoch.load(Ordering::Acquire) == previous_start_value
            } else {
                self.odd_end_epoch.load(Ordering::Acquire) == previous_start_value
            };
            if drained {
                break;
            }
            yield_strategy.wait_once(sleep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ThreadSleep;
    use std::sync::atomic::{AtomicUsize, Ordering as StdOrdering};

    #[test]
    fn single_threaded_flip_is_immediate() {
        let phaser = Phaser::new();
        let token = phaser.writer_enter();
        phaser.writer_exit(token);
        phaser.flip_phase(YieldStrategy::Spin, &ThreadSleep);
        phaser.flip_phase(YieldStrategy::Spin, &ThreadSleep);
    }

    #[test]
    fn drains_concurrent_writers() {
        let phaser = Phaser::new();
        let counter = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..2000 {
                        let token = phaser.writer_enter();
                        counter.fetch_add(1, StdOrdering::SeqCst);
                        phaser.writer_exit(token);
                    }
                });
            }
            // repeatedly flip while writers are in flight; each flip must
            // complete (proving the drain wait terminates) without losing
            // any writer's increment.
            for _ in 0..50 {
                phaser.flip_phase(YieldStrategy::Spin, &ThreadSleep);
            }
        });
        assert_eq!(counter.load(StdOrdering::SeqCst), 16_000);
    }
}
