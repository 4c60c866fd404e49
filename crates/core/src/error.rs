use std::path::PathBuf;

use thiserror::Error;

use crate::digest::DigestAlgorithm;

/// Error type for digest, baseline, and configuration operations.
///
/// A missing file is *not* an error here: the digester reports it as
/// `Ok(None)` so callers can classify it as deleted. Everything below is a
/// real failure.
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// I/O failure other than simple absence (permission denied, device error, ...).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted baseline is missing, corrupt, or not in a known format.
    #[error("Baseline store {} is unreadable: {reason}", path.display())]
    StoreUnreadable { path: PathBuf, reason: String },

    /// Writing the baseline store failed.
    #[error("Failed to write baseline store {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The baseline was produced with a different algorithm than the one configured.
    ///
    /// Checking anyway would flag every file as modified, so this is surfaced
    /// before any file is hashed.
    #[error("Baseline was recorded with {recorded} but the check is configured for {configured}")]
    AlgorithmMismatch { recorded: DigestAlgorithm, configured: DigestAlgorithm },

    /// The monitor configuration file could not be read or parsed.
    #[error("Config {} is unreadable: {reason}", path.display())]
    ConfigUnreadable { path: PathBuf, reason: String },

    /// Configuration was parsed but is not usable.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A reporter failed to write its output.
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

/// Convenience result type for integrity operations.
pub type IntegrityResult<T> = Result<T, IntegrityError>;
