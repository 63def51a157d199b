//! Tarball digests
//!
//! Files are hashed in fixed-size chunks so memory use stays bounded no
//! matter how large the sysroot image is. The algorithm follows from the
//! length of the expected hex digest: 40 characters is SHA-1, 64 is SHA-256.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::config::defaults::CHECKSUM_CHUNK_SIZE;
use crate::error::FilesystemError;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Sha1,
    Sha256,
}

impl DigestKind {
    /// Infer the algorithm from an expected hex digest
    ///
    /// Returns `None` when the string is not a hex digest of a known length.
    pub fn for_hex(expected: &str) -> Option<Self> {
        if !expected.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match expected.len() {
            40 => Some(DigestKind::Sha1),
            64 => Some(DigestKind::Sha256),
            _ => None,
        }
    }
}

/// Hash a reader to completion in `CHECKSUM_CHUNK_SIZE` chunks
fn stream_digest<D: Digest>(reader: &mut impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the hex digest of a file
pub fn file_digest(path: &Path, kind: DigestKind) -> Result<String, FilesystemError> {
    let read_error = |e: std::io::Error| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut file = File::open(path).map_err(read_error)?;
    match kind {
        DigestKind::Sha1 => stream_digest::<Sha1>(&mut file),
        DigestKind::Sha256 => stream_digest::<Sha256>(&mut file),
    }
    .map_err(read_error)
}

/// Compute the hex digest of in-memory data
pub fn compute_digest(data: &[u8], kind: DigestKind) -> String {
    match kind {
        DigestKind::Sha1 => hex::encode(Sha1::digest(data)),
        DigestKind::Sha256 => hex::encode(Sha256::digest(data)),
    }
}

/// Outcome of comparing a file against an expected digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch { actual: String },
}

/// Check a file against an expected digest (case-insensitive)
///
/// An expected value that is not a recognised digest can never match; the
/// reported actual digest is then SHA-1.
pub fn verify_file(path: &Path, expected: &str) -> Result<Verification, FilesystemError> {
    let kind = DigestKind::for_hex(expected).unwrap_or(DigestKind::Sha1);
    let actual = file_digest(path, kind)?;

    if actual.eq_ignore_ascii_case(expected) {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch { actual })
    }
}
