//! On-disk baseline format.
//!
//! Current stores are a tagged JSON object:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "algorithm": "sha256",
//!   "created_at": "2026-10-19T12:00:00Z",
//!   "files": { "x.txt": "2cf24dba..." }
//! }
//! ```
//!
//! Older stores are a bare `path -> digest` object with no algorithm tag.
//! Those still load, with `algorithm: None`.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::digest::{DigestAlgorithm, FileDigest};
use crate::error::{IntegrityError, IntegrityResult};
use crate::model::Baseline;

/// Store format version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreRecord {
    format_version: u32,
    algorithm: DigestAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    files: IndexMap<String, FileDigest>,
}

/// Serialize a baseline to its on-disk JSON form.
pub fn encode(baseline: &Baseline) -> serde_json::Result<String> {
    match baseline.algorithm {
        Some(algorithm) => serde_json::to_string_pretty(&StoreRecord {
            format_version: FORMAT_VERSION,
            algorithm,
            created_at: baseline.created_at.clone(),
            files: baseline.files.clone(),
        }),
        // Untagged baselines are written back the way they were read.
        None => serde_json::to_string_pretty(&baseline.files),
    }
}

/// Parse on-disk JSON into a baseline. `Err` carries a human-readable reason.
pub fn decode(body: &str) -> Result<Baseline, String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {e}"))?;

    let Some(object) = value.as_object() else {
        return Err("expected a JSON object".to_string());
    };

    let tagged = ["format_version", "algorithm", "files"].iter().all(|k| object.contains_key(*k));
    if !tagged {
        let files: IndexMap<String, FileDigest> = serde_json::from_value(value)
            .map_err(|e| format!("not a path -> digest mapping: {e}"))?;
        return Ok(Baseline { algorithm: None, created_at: None, files });
    }

    let record: StoreRecord =
        serde_json::from_value(value).map_err(|e| format!("malformed baseline record: {e}"))?;

    if record.format_version > FORMAT_VERSION {
        return Err(format!(
            "unsupported format_version {}; newest supported is {FORMAT_VERSION}",
            record.format_version
        ));
    }

    if let Some((path, digest)) =
        record.files.iter().find(|(_, d)| d.as_str().len() != record.algorithm.hex_len())
    {
        return Err(format!(
            "digest for '{path}' has length {} but {} digests are {} hex characters",
            digest.as_str().len(),
            record.algorithm,
            record.algorithm.hex_len()
        ));
    }

    Ok(Baseline {
        algorithm: Some(record.algorithm),
        created_at: record.created_at,
        files: record.files,
    })
}

/// Read and parse the store at `path`.
pub fn read_store(path: &Path) -> IntegrityResult<Baseline> {
    let body = fs::read_to_string(path).map_err(|e| IntegrityError::StoreUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    decode(&body)
        .map_err(|reason| IntegrityError::StoreUnreadable { path: path.to_path_buf(), reason })
}

/// Write the store through a sibling temp file and rename it into place.
///
/// A crash mid-write leaves either the previous store or the complete new one.
pub fn write_store(path: &Path, baseline: &Baseline) -> IntegrityResult<()> {
    let write_err = |source| IntegrityError::StoreWrite { path: path.to_path_buf(), source };

    let body = encode(baseline).map_err(|e| write_err(e.into()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = temp_path_for(path);
    let written = write_synced(&temp_path, body.as_bytes())
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(err) = written {
        // Never leave a half-written temp file beside the store. A directory
        // there was not created by us and blocks the write instead.
        if fs::symlink_metadata(&temp_path).is_ok_and(|meta| !meta.is_dir()) {
            let _ = fs::remove_file(&temp_path);
        }
        return Err(write_err(err));
    }
    Ok(())
}

fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file =
        fs::OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
    file.write_all(body)?;
    file.write_all(b"\n")?;
    file.sync_all()
}

/// `file_hashes.json` -> `file_hashes.json.tmp`, in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
