//! Baseline ownership: establish, persist, load, and check.
//!
//! `IntegrityStore` is the only component that touches the persisted
//! baseline. Durable state moves through two states:
//! - `Uninitialized`: nothing persisted yet; checks fail with `StoreUnreadable`.
//! - `Established`: a baseline is on disk; re-establishing fully replaces it.

pub mod format;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::digest::{compute_digest, DigestAlgorithm};
use crate::error::{IntegrityError, IntegrityResult};
use crate::model::{AnomalyRecord, Baseline, CheckReport, Classification};

/// Store file name used when the configuration does not choose one.
pub const DEFAULT_STORE_FILE: &str = "file_hashes.json";

/// Durable state of a store location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Established,
}

/// Outcome of establishing a baseline.
///
/// Persisting can fail without invalidating the freshly computed baseline, so
/// the write error travels alongside it instead of replacing it.
#[derive(Debug)]
pub struct Established {
    pub baseline: Baseline,
    /// Paths that were requested but absent, in request order.
    pub skipped: Vec<String>,
    /// Set when the baseline could not be saved for future runs.
    pub persist_error: Option<IntegrityError>,
}

impl Established {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Owner of one baseline store location and the algorithm used against it.
#[derive(Debug, Clone)]
pub struct IntegrityStore {
    location: PathBuf,
    algorithm: DigestAlgorithm,
}

impl IntegrityStore {
    pub fn new(location: impl Into<PathBuf>, algorithm: DigestAlgorithm) -> Self {
        Self { location: location.into(), algorithm }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn state(&self) -> StoreState {
        if self.location.is_file() {
            StoreState::Established
        } else {
            StoreState::Uninitialized
        }
    }

    /// Digest every path and persist the result as the new baseline.
    ///
    /// Paths that are absent are left out of the baseline (they are simply not
    /// monitored). Any other I/O failure while digesting aborts the whole
    /// operation and nothing is written.
    pub fn establish_baseline<I, S>(&self, paths: I) -> IntegrityResult<Established>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut baseline = Baseline::new(self.algorithm);
        let mut skipped = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match compute_digest(path, self.algorithm)? {
                Some(digest) => {
                    baseline.files.insert(path.to_string(), digest);
                }
                None => {
                    tracing::warn!(path, "not found at baseline time; it will not be monitored");
                    skipped.push(path.to_string());
                }
            }
        }

        let persist_error = match format::write_store(&self.location, &baseline) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "baseline kept in memory only");
                Some(err)
            }
        };

        tracing::info!(
            store = %self.location.display(),
            algorithm = %self.algorithm,
            tracked = baseline.len(),
            skipped = skipped.len(),
            persisted = persist_error.is_none(),
            "baseline established"
        );

        Ok(Established { baseline, skipped, persist_error })
    }

    /// Load the persisted baseline.
    ///
    /// A missing or unparseable store is [`IntegrityError::StoreUnreadable`];
    /// a store with zero entries loads fine.
    pub fn load_baseline(&self) -> IntegrityResult<Baseline> {
        format::read_store(&self.location)
    }

    /// Re-digest every baseline entry and classify the differences.
    ///
    /// Records come out in baseline order. Unchanged files produce nothing.
    /// The baseline is never modified, so repeated calls against an unchanged
    /// filesystem return the same report.
    pub fn check(&self, baseline: &Baseline) -> IntegrityResult<CheckReport> {
        self.ensure_algorithm(baseline)?;

        let mut report = CheckReport::default();
        for (path, recorded) in baseline.iter() {
            report.files_checked += 1;
            match compute_digest(path, self.algorithm)? {
                None => report.anomalies.push(AnomalyRecord::new(path, Classification::Deleted)),
                Some(current) if current != *recorded => {
                    report.anomalies.push(AnomalyRecord::new(path, Classification::Modified))
                }
                Some(_) => {}
            }
        }

        tracing::info!(
            checked = report.files_checked,
            modified = report.count(Classification::Modified),
            deleted = report.count(Classification::Deleted),
            "check complete"
        );
        Ok(report)
    }

    /// Load the persisted baseline and check it. This is one monitoring cycle.
    pub fn check_persisted(&self) -> IntegrityResult<CheckReport> {
        let baseline = self.load_baseline()?;
        self.check(&baseline)
    }

    /// [`check`](Self::check), then report tracked paths that exist now but
    /// are not in the baseline as [`Classification::Added`].
    pub fn scan<I, S>(&self, baseline: &Baseline, tracked: I) -> IntegrityResult<CheckReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = self.check(baseline)?;
        let mut seen = HashSet::new();

        for path in tracked {
            let path = path.as_ref();
            if baseline.contains(path) || !seen.insert(path.to_string()) {
                continue;
            }
            if compute_digest(path, self.algorithm)?.is_some() {
                report.anomalies.push(AnomalyRecord::new(path, Classification::Added));
            }
        }

        Ok(report)
    }

    fn ensure_algorithm(&self, baseline: &Baseline) -> IntegrityResult<()> {
        match baseline.algorithm {
            Some(recorded) if recorded != self.algorithm => {
                Err(IntegrityError::AlgorithmMismatch { recorded, configured: self.algorithm })
            }
            _ => Ok(()),
        }
    }
}
