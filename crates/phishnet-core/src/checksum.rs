//! SHA-256 fingerprints of pipeline artifacts.
//!
//! The model artifact has no version field; its digest is what identifies one
//! training run's output in logs and CLI output.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Hex digits shown when a full digest would clutter a line.
pub const SHORT_LEN: usize = 12;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the file at `path`, streamed.
pub fn sha256_path(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Leading [`SHORT_LEN`] digits of a digest.
pub fn short(digest: &str) -> &str {
    digest.get(..SHORT_LEN).unwrap_or(digest)
}
