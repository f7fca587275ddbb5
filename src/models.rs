//! Core data models for the document knowledge pipeline.
//!
//! These types represent the documents, chunks, cards, and run manifest that
//! flow through the conversion pipeline. Everything that reaches an output
//! artifact is serde-serializable; [`Document`] itself is in-memory only and
//! exists solely to feed the chunker and card builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// In-memory result of loading one input file.
///
/// Built by the loader and immutable afterward. Only derived [`Chunk`]s and
/// [`KnowledgeCard`]s are persisted.
#[derive(Debug, Clone)]
pub struct Document {
    /// Deterministic id: SHA-256 of canonical path + content.
    pub id: String,
    pub path: PathBuf,
    /// Normalized text, one entry per line, trailing whitespace stripped.
    /// Blank lines are preserved so line numbering stays stable.
    pub lines: Vec<String>,
    /// Page of origin for each line (1-based), parallel to `lines`.
    /// `None` for line-oriented sources.
    pub line_pages: Vec<Option<u32>>,
    /// Total pages in the source, for page-oriented formats.
    pub page_count: usize,
    /// 1-based pages that yielded no extractable text. Recorded for
    /// diagnostics; an empty page never fails the document.
    pub empty_pages: Vec<u32>,
}

impl Document {
    /// Number of whitespace-separated words across all lines.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|l| l.split_whitespace().count()).sum()
    }
}

/// An overlapping window of consecutive words from one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub doc_id: String,
    /// 0-based, strictly increasing per document.
    pub ordinal: usize,
    pub text: String,
    pub source_path: String,
    /// Page of the chunk's first word (page-oriented sources only).
    pub page: Option<u32>,
    /// Inclusive 1-based line range the window's words were drawn from.
    pub line_start: usize,
    pub line_end: usize,
}

/// Provenance pointer from an extracted fact back to its source location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub doc_id: String,
    pub source_path: String,
    pub text_excerpt: String,
    pub page: Option<u32>,
    pub line: Option<usize>,
}

/// Per-document summary record: facts, acronyms, entities, citations.
///
/// Invariants: `facts.len() <= 5` and `citations.len() == facts.len()`
/// (exactly one citation per fact, same order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeCard {
    pub id: String,
    pub title: String,
    /// Detected document date, or the run date when none is found.
    pub date: String,
    pub source_path: String,
    pub facts: Vec<String>,
    pub acronyms: Vec<String>,
    pub entities: Vec<String>,
    pub citations: Vec<Citation>,
}

/// One input file the pipeline could not convert, with a short reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Aggregate record for one pipeline run. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Files successfully converted (files discovered minus skips).
    pub total_documents: usize,
    pub total_cards: usize,
    pub total_chunks: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub created_at: DateTime<Utc>,
}
