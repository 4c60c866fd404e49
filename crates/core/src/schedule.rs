//! Fixed-interval repetition.
//!
//! `Schedule` only decides *when* to run a task; it knows nothing about
//! baselines. Sleeping goes through [`Sleeper`] so tests can drive many
//! cycles without waiting on a real clock.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Something that can wait for a duration.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Counts of how a schedule run went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub cycles: u64,
    pub failed: u64,
}

/// Run a task every `interval`, one pass at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    interval: Duration,
    max_cycles: Option<u64>,
}

impl Schedule {
    pub fn every(interval: Duration) -> Self {
        Self { interval, max_cycles: None }
    }

    /// Stop after `cycles` passes instead of running until told to stop.
    /// `Some(0)` runs nothing.
    pub fn with_max_cycles(mut self, cycles: Option<u64>) -> Self {
        self.max_cycles = cycles;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `task` until `stop` is set or the cycle limit is reached.
    ///
    /// The task receives the 1-based cycle number. A failing cycle is logged
    /// and counted; the schedule keeps going. `stop` is only observed between
    /// cycles, never in the middle of one.
    pub fn run<S, F, E>(&self, stop: &AtomicBool, sleeper: &mut S, mut task: F) -> ScheduleSummary
    where
        S: Sleeper + ?Sized,
        F: FnMut(u64) -> Result<(), E>,
        E: Display,
    {
        let mut summary = ScheduleSummary::default();

        let under_limit = |cycles: u64| self.max_cycles.map_or(true, |max| cycles < max);

        while !stop.load(Ordering::SeqCst) && under_limit(summary.cycles) {
            summary.cycles += 1;
            if let Err(err) = task(summary.cycles) {
                summary.failed += 1;
                tracing::error!(cycle = summary.cycles, error = %err, "cycle failed; continuing");
            }

            if self.max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }
            if stop.load(Ordering::SeqCst) {
                break;
            }
            sleeper.sleep(self.interval);
        }

        tracing::debug!(cycles = summary.cycles, failed = summary.failed, "schedule finished");
        summary
    }
}
