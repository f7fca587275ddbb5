//! Batch pipeline orchestration.
//!
//! Drives the full run: discover input files, then for each file
//! load → chunk → build card, accumulating results in input order. A
//! [`LoadError`](crate::loader::LoadError) demotes that one file to a
//! manifest skip entry and the batch continues; configuration, input-path,
//! and write failures abort the run before anything is persisted.
//! Processing a document has no side effects until the single write at the
//! end.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::cards::build_card;
use crate::chunker::chunk_document;
use crate::config::{self, Config};
use crate::loader;
use crate::models::{Chunk, KnowledgeCard, Manifest, SkippedFile};
use crate::writer;

/// In-memory result of one run, mirroring what was written to disk.
#[derive(Debug)]
pub struct BuildSummary {
    pub cards: Vec<KnowledgeCard>,
    pub chunks: Vec<Chunk>,
    pub manifest: Manifest,
}

/// Run the full conversion over `input`, writing artifacts into `out_dir`.
///
/// `created_at` stamps the manifest and the card date fallback; callers pin
/// it to make runs reproducible byte for byte.
pub fn run_build(
    config: &Config,
    input: &Path,
    out_dir: &Path,
    created_at: DateTime<Utc>,
) -> Result<BuildSummary> {
    config::validate(config)?;

    let files = loader::discover_files(input, &config.input)
        .with_context(|| format!("Failed to scan input folder: {}", input.display()))?;

    let mut cards: Vec<KnowledgeCard> = Vec::new();
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut skipped: Vec<SkippedFile> = Vec::new();

    for path in &files {
        let doc = match loader::load_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("skip {}: {}", path.display(), e);
                skipped.push(SkippedFile {
                    path: path.to_string_lossy().to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if !doc.empty_pages.is_empty() {
            eprintln!(
                "note {}: {} of {} pages yielded no text",
                path.display(),
                doc.empty_pages.len(),
                doc.page_count
            );
        }

        let doc_chunks = chunk_document(&doc, &config.chunking);
        let card = build_card(&doc, created_at);

        println!(
            "{} {} lines, {} chunks, {} facts",
            path.display(),
            doc.lines.len(),
            doc_chunks.len(),
            card.facts.len()
        );

        cards.push(card);
        chunks.extend(doc_chunks);
    }

    let manifest = Manifest {
        total_documents: cards.len(),
        total_cards: cards.len(),
        total_chunks: chunks.len(),
        skipped_files: skipped,
        created_at,
    };

    writer::write_artifacts(out_dir, &cards, &chunks, &manifest)?;

    println!("build {}", input.display());
    println!("  files discovered: {}", files.len());
    println!("  cards written: {}", manifest.total_cards);
    println!("  chunks written: {}", manifest.total_chunks);
    println!("  skipped: {}", manifest.skipped_files.len());
    println!("ok");

    Ok(BuildSummary {
        cards,
        chunks,
        manifest,
    })
}

/// Load a single file and build its card without writing anything.
pub fn inspect_file(path: &Path, created_at: DateTime<Utc>) -> Result<KnowledgeCard> {
    let doc = loader::load_document(path)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    Ok(build_card(&doc, created_at))
}
