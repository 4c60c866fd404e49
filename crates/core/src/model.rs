//! Baseline and check result types.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::digest::{DigestAlgorithm, FileDigest};

/// Recorded path → digest mapping plus the algorithm that produced it.
///
/// Paths are opaque keys: they are not normalized, so `./a.txt` and `a.txt`
/// are tracked separately. Entries keep the order the paths were supplied in,
/// through persistence and reload, so check reports come out in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// `None` only for stores written in the untagged legacy format.
    pub algorithm: Option<DigestAlgorithm>,
    /// RFC 3339 timestamp of when the baseline was established, if known.
    pub created_at: Option<String>,
    pub files: IndexMap<String, FileDigest>,
}

impl Baseline {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
            created_at: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            files: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&FileDigest> {
        self.files.get(path)
    }

    /// Iterate tracked paths and their recorded digests in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileDigest)> {
        self.files.iter().map(|(path, digest)| (path.as_str(), digest))
    }

    /// Two baselines track the same files with the same digests.
    ///
    /// Ignores the `algorithm` and `created_at` metadata.
    pub fn same_entries(&self, other: &Baseline) -> bool {
        self.files == other.files
    }
}

/// How a tracked path differs from its baseline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Present, but content digest differs from the recorded one.
    Modified,
    /// Recorded in the baseline, no longer present.
    Deleted,
    /// Configured for tracking and present now, but not in the baseline.
    Added,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Modified => "MODIFIED",
            Classification::Deleted => "DELETED",
            Classification::Added => "ADDED",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One anomaly found by a check pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub path: String,
    pub classification: Classification,
}

impl AnomalyRecord {
    pub fn new(path: impl Into<String>, classification: Classification) -> Self {
        Self { path: path.into(), classification }
    }
}

/// Result of a single check pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Number of baseline entries that were re-digested.
    pub files_checked: usize,
    /// Anomalies in baseline order, followed by any additions.
    pub anomalies: Vec<AnomalyRecord>,
}

impl CheckReport {
    /// No anomalies were found.
    pub fn is_intact(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.anomalies.iter().filter(|a| a.classification == classification).count()
    }
}
