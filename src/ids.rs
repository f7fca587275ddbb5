//! Deterministic identifier derivation.
//!
//! Every id in the pipeline is a SHA-256 hex digest over the inputs that
//! define the record, so identical input and configuration always reproduce
//! identical ids. No random or auto-incrementing ids anywhere.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex-encoded SHA-256 of a byte string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Document id: digest of the canonical source path and the full
/// normalized text.
pub fn doc_id(path: &Path, text: &str) -> String {
    let canonical = canonical_path(path);
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hasher.update(b":");
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Chunk id: digest of the owning document id, the chunk ordinal, and the
/// chunking configuration. Re-chunking with a different window produces
/// different ids for the same document.
pub fn chunk_id(doc_id: &str, ordinal: usize, chunk_size: usize, overlap: usize) -> String {
    sha256_hex(format!("{doc_id}:{ordinal}:{chunk_size}:{overlap}").as_bytes())
}

/// Card id: digest of the owning document id.
pub fn card_id(doc_id: &str) -> String {
    sha256_hex(format!("card:{doc_id}").as_bytes())
}

/// Normalize a path for id purposes without touching the filesystem:
/// canonicalizing through `fs::canonicalize` would make ids depend on where
/// the input folder happens to be mounted.
fn canonical_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
