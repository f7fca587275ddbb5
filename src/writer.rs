//! Artifact serialization.
//!
//! Persists a run's cards, chunks, and manifest as three independent files:
//! `cards.jsonl` and `chunks.jsonl` (one self-contained JSON record per
//! line, in the order documents were processed) and `manifest.json` (a
//! single pretty-printed object). Each artifact is serialized fully in
//! memory and written in one call; any failure is fatal for the run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::models::{Chunk, KnowledgeCard, Manifest};

pub const CARDS_FILE: &str = "cards.jsonl";
pub const CHUNKS_FILE: &str = "chunks.jsonl";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Write all three artifacts into `out_dir`, creating it if needed.
pub fn write_artifacts(
    out_dir: &Path,
    cards: &[KnowledgeCard],
    chunks: &[Chunk],
    manifest: &Manifest,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output folder: {}", out_dir.display()))?;

    write_jsonl(&out_dir.join(CARDS_FILE), cards)?;
    write_jsonl(&out_dir.join(CHUNKS_FILE), chunks)?;

    let manifest_path = out_dir.join(MANIFEST_FILE);
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    std::fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(())
}

/// One JSON record per line, insertion order preserved.
fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    std::fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))
}
