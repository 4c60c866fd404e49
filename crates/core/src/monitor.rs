//! Wiring of store, tracked paths, reporter, and schedule into one monitor.

use std::path::Path;
use std::sync::atomic::AtomicBool;

use crate::config::MonitorConfig;
use crate::error::{IntegrityError, IntegrityResult};
use crate::model::{Baseline, CheckReport};
use crate::report::Reporter;
use crate::schedule::{Schedule, ScheduleSummary, Sleeper};
use crate::store::{Established, IntegrityStore};

/// A configured integrity monitor: what to track, where the baseline lives,
/// and where results go.
#[derive(Debug)]
pub struct Monitor<R: Reporter> {
    store: IntegrityStore,
    tracked: Vec<String>,
    report_added: bool,
    reporter: R,
    /// Baseline that could not be persisted; checked instead of the store.
    pinned: Option<Baseline>,
}

impl<R: Reporter> Monitor<R> {
    pub fn new(store: IntegrityStore, tracked: Vec<String>, reporter: R) -> Self {
        Self { store, tracked, report_added: false, reporter, pinned: None }
    }

    /// Build a monitor from a validated config. Relative store paths resolve
    /// against `base_dir`.
    pub fn from_config(config: &MonitorConfig, base_dir: &Path, reporter: R) -> Self {
        Self {
            store: config.integrity_store(base_dir),
            tracked: config.paths.clone(),
            report_added: config.report_added,
            reporter,
            pinned: None,
        }
    }

    pub fn with_report_added(mut self, report_added: bool) -> Self {
        self.report_added = report_added;
        self
    }

    pub fn store(&self) -> &IntegrityStore {
        &self.store
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Replace the persisted baseline with the current state of the tracked paths.
    ///
    /// If the store cannot be written, later cycles check the returned
    /// in-memory baseline rather than whatever is left on disk.
    pub fn establish(&mut self) -> IntegrityResult<Established> {
        let established = self.store.establish_baseline(&self.tracked)?;
        self.pinned = established.persist_error.is_some().then(|| established.baseline.clone());
        Ok(established)
    }

    /// True when cycles run against an in-memory baseline the store never received.
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// One monitoring cycle: load the baseline, check it, hand the result to
    /// the reporter.
    pub fn run_cycle(&mut self) -> IntegrityResult<CheckReport> {
        let loaded;
        let baseline = match &self.pinned {
            Some(baseline) => baseline,
            None => {
                loaded = self.store.load_baseline()?;
                &loaded
            }
        };
        let report = if self.report_added {
            self.store.scan(baseline, &self.tracked)?
        } else {
            self.store.check(baseline)?
        };
        self.reporter.report(&report).map_err(IntegrityError::Report)?;
        Ok(report)
    }

    /// Run cycles on `schedule` until `stop` is set or the cycle limit is hit.
    pub fn watch<S: Sleeper + ?Sized>(
        &mut self,
        schedule: &Schedule,
        stop: &AtomicBool,
        sleeper: &mut S,
    ) -> ScheduleSummary {
        tracing::info!(
            store = %self.store.location().display(),
            tracked = self.tracked.len(),
            interval_secs = schedule.interval().as_secs(),
            "watching files"
        );
        schedule.run(stop, sleeper, |_| self.run_cycle().map(|_| ()))
    }
}
