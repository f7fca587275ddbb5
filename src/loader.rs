//! Input discovery and per-file text extraction.
//!
//! [`discover_files`] walks the input root and returns a deterministic,
//! lexicographically ordered file list. [`load_document`] turns one file into
//! a normalized [`Document`] with line/page provenance, or a [`LoadError`]
//! the pipeline records as a manifest skip. The loader never aborts the
//! batch; classifying a file as unreadable is its caller's recoverable unit.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use anyhow::Result;

use crate::config::InputConfig;
use crate::ids;
use crate::models::Document;

/// Extensions treated as line-oriented text.
const TEXT_EXTS: &[&str] = &["txt", "md"];
/// Extensions treated as page-oriented documents.
const PDF_EXTS: &[&str] = &["pdf"];

/// Per-file load failure. Converted into a manifest skip entry by the
/// pipeline driver; never fatal for the run.
#[derive(Debug)]
pub enum LoadError {
    UnsupportedType(String),
    Empty,
    Corrupted(String),
    PasswordProtected,
    Unreadable(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::UnsupportedType(ext) => write!(f, "unsupported type: .{}", ext),
            LoadError::Empty => write!(f, "empty"),
            LoadError::Corrupted(e) => write!(f, "corrupted: {}", e),
            LoadError::PasswordProtected => write!(f, "password-protected"),
            LoadError::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Walk `root` and return every regular file matching the configured globs,
/// sorted by relative path so batch order is deterministic.
///
/// Unsupported extensions are *not* filtered here: they count as discovered
/// files and become skip entries when loading fails.
pub fn discover_files(root: &Path, input: &InputConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Input folder does not exist: {}", root.display());
    }

    let include_set = build_globset(&input.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(input.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();

    let walker = WalkDir::new(root).follow_links(input.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push((rel_str, path.to_path_buf()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, p)| p).collect())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Load one file into a normalized [`Document`].
///
/// Unsupported extensions fail with [`LoadError::UnsupportedType`] without
/// opening the file. Text files are decoded (UTF-8 with lossy fallback) and
/// split into lines with trailing whitespace stripped; blank lines are kept
/// so line numbers stay stable. PDFs are extracted page by page; a page
/// yielding no text is recorded but only a document with zero text across
/// all pages fails, with [`LoadError::Empty`].
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if TEXT_EXTS.contains(&ext.as_str()) {
        load_text(path)
    } else if PDF_EXTS.contains(&ext.as_str()) {
        load_pdf(path)
    } else {
        Err(LoadError::UnsupportedType(ext))
    }
}

fn load_text(path: &Path) -> Result<Document, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Unreadable(e.to_string()))?;
    let content = String::from_utf8_lossy(&bytes);

    let lines: Vec<String> = content
        .lines()
        .map(|l| l.trim_end().to_string())
        .collect();

    if lines.iter().all(|l| l.is_empty()) {
        return Err(LoadError::Empty);
    }

    let line_pages = vec![None; lines.len()];
    Ok(finish_document(path, lines, line_pages, 0, Vec::new()))
}

fn load_pdf(path: &Path) -> Result<Document, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Unreadable(e.to_string()))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| classify_pdf_error(e.to_string()))?;

    // pdf-extract separates pages with form feeds; a PDF without them is
    // treated as a single page.
    let pages: Vec<&str> = text.split('\u{c}').collect();
    let page_count = pages.len();

    let mut lines = Vec::new();
    let mut line_pages = Vec::new();
    let mut empty_pages = Vec::new();

    for (idx, page_text) in pages.iter().enumerate() {
        let page_no = (idx + 1) as u32;
        if page_text.trim().is_empty() {
            empty_pages.push(page_no);
            continue;
        }
        for line in page_text.lines() {
            lines.push(line.trim_end().to_string());
            line_pages.push(Some(page_no));
        }
    }

    if lines.iter().all(|l| l.is_empty()) {
        return Err(LoadError::Empty);
    }

    Ok(finish_document(path, lines, line_pages, page_count, empty_pages))
}

/// Map a pdf-extract failure message onto a skip reason. Encryption
/// surfaces in the message text, so the match is on the wording.
fn classify_pdf_error(msg: String) -> LoadError {
    let lower = msg.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") {
        LoadError::PasswordProtected
    } else {
        LoadError::Corrupted(msg)
    }
}

fn finish_document(
    path: &Path,
    lines: Vec<String>,
    line_pages: Vec<Option<u32>>,
    page_count: usize,
    empty_pages: Vec<u32>,
) -> Document {
    let full_text = lines.join("\n");
    Document {
        id: ids::doc_id(path, &full_text),
        path: path.to_path_buf(),
        lines,
        line_pages,
        page_count,
        empty_pages,
    }
}
