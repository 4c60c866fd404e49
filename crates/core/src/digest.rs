//! File digesting.
//!
//! Files are streamed through the hasher in fixed [`BLOCK_SIZE`] blocks so
//! memory use does not depend on file size. A missing file is reported as
//! `Ok(None)` rather than an error; callers use that to classify deletions.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{IntegrityError, IntegrityResult};

/// Read block size used when streaming a file into the hasher.
pub const BLOCK_SIZE: usize = 4096;

/// Hash function used to produce a baseline.
///
/// One baseline is always produced with a single algorithm; checking it with
/// another one is rejected by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// All supported algorithms, in ascending output size.
    pub const ALL: [DigestAlgorithm; 4] = [
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "sha224",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of a hex-encoded digest produced by this algorithm.
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha224 => 56,
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha384 => 96,
            DigestAlgorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "");
        DigestAlgorithm::ALL.into_iter().find(|alg| alg.as_str() == normalized).ok_or_else(|| {
            IntegrityError::InvalidConfig(format!(
                "Unknown digest algorithm '{s}'. Allowed: sha224, sha256, sha384, sha512"
            ))
        })
    }
}

/// Lowercase hex digest of one file's full content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileDigest(String);

impl FileDigest {
    /// Wrap an existing hex string (e.g. one read back from a store).
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the digest of the file at `path`.
///
/// Returns `Ok(None)` when the path does not exist or is not a regular file.
/// Any other failure (permission denied, an error while reading) is returned
/// as [`IntegrityError::Io`] and must not be treated as a deletion.
pub fn compute_digest(
    path: impl AsRef<Path>,
    algorithm: DigestAlgorithm,
) -> IntegrityResult<Option<FileDigest>> {
    let path = path.as_ref();
    let io_err = |source| IntegrityError::Io { path: path.to_path_buf(), source };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file absent");
            return Ok(None);
        }
        Err(err) => return Err(io_err(err)),
    };

    if !file.metadata().map_err(io_err)?.is_file() {
        tracing::debug!(path = %path.display(), "not a regular file, treating as absent");
        return Ok(None);
    }

    let digest = digest_reader(algorithm, file).map_err(io_err)?;
    tracing::debug!(path = %path.display(), %algorithm, digest = %digest, "digest computed");
    Ok(Some(digest))
}

/// Stream any reader through the hasher in [`BLOCK_SIZE`] blocks.
pub fn digest_reader<R: Read>(algorithm: DigestAlgorithm, reader: R) -> io::Result<FileDigest> {
    let hex = match algorithm {
        DigestAlgorithm::Sha224 => stream::<Sha224, R>(reader)?,
        DigestAlgorithm::Sha256 => stream::<Sha256, R>(reader)?,
        DigestAlgorithm::Sha384 => stream::<Sha384, R>(reader)?,
        DigestAlgorithm::Sha512 => stream::<Sha512, R>(reader)?,
    };
    Ok(FileDigest(hex))
}

/// Digest an in-memory buffer.
pub fn digest_bytes(algorithm: DigestAlgorithm, bytes: &[u8]) -> FileDigest {
    let hex = match algorithm {
        DigestAlgorithm::Sha224 => hex::encode(Sha224::digest(bytes)),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        DigestAlgorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
        DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
    };
    FileDigest(hex)
}

fn stream<D: Digest, R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; BLOCK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn sha256_known_answer() {
        let d = digest_bytes(DigestAlgorithm::Sha256, b"hello");
        assert_eq!(d.as_str(), "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");
    }

    #[test]
    fn hex_length_matches_algorithm() {
        for alg in DigestAlgorithm::ALL {
            assert_eq!(digest_bytes(alg, b"abc").as_str().len(), alg.hex_len(), "{alg}");
        }
    }

    #[test]
    fn chunking_does_not_change_digest() {
        let data: Vec<u8> = (0..(BLOCK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        for alg in DigestAlgorithm::ALL {
            let whole = digest_bytes(alg, &data);
            for step in [1, 7, BLOCK_SIZE - 1, BLOCK_SIZE, BLOCK_SIZE + 1] {
                let streamed = digest_reader(alg, Trickle { data: &data, step }).unwrap();
                assert_eq!(streamed, whole, "{alg} step {step}");
            }
        }
    }

    /// Reader that yields some data and then fails.
    struct FailsMidway {
        served: bool,
    }

    impl Read for FailsMidway {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
            }
            self.served = true;
            let n = buf.len().min(BLOCK_SIZE);
            buf[..n].fill(0xAB);
            Ok(n)
        }
    }

    #[test]
    fn read_error_midway_is_returned_not_swallowed() {
        let err = digest_reader(DigestAlgorithm::Sha256, FailsMidway { served: false }).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "device went away");
    }

    #[test]
    fn parses_algorithm_names_loosely() {
        assert_eq!("SHA-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!(" sha512 ".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        let err = "md5".parse::<DigestAlgorithm>().unwrap_err();
        assert!(err.to_string().contains("Unknown digest algorithm"));
    }
}
