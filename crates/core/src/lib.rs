//! hashguard-core
//!
//! Core library for digest-based file integrity monitoring.
//!
//! A fixed set of files is digested into a baseline that is persisted to a
//! JSON store. Later check passes re-digest every baseline entry and report
//! files that were modified or deleted (and, on request, tracked files that
//! appeared after the baseline was taken).
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends; the `hashguard` CLI is a thin wrapper.

pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod monitor;
pub mod report;
pub mod schedule;
pub mod store;

pub use digest::{compute_digest, DigestAlgorithm, FileDigest};
pub use error::{IntegrityError, IntegrityResult};
pub use model::{AnomalyRecord, Baseline, CheckReport, Classification};
pub use store::{Established, IntegrityStore, StoreState};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
