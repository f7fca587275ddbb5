//! Overlapping word-window chunker.
//!
//! Flattens a document's lines into a single word sequence (retaining the
//! line and page each word came from) and slides a fixed-size window over
//! it. Consecutive windows advance by `chunk_size - overlap` words, so the
//! union of all windows covers the word sequence with no gaps, only
//! overlaps. Identical (text, chunk_size, overlap) always yields
//! byte-identical chunk boundaries and ids.

use crate::config::ChunkingConfig;
use crate::ids;
use crate::models::{Chunk, Document};

/// Split a document into overlapping word-window [`Chunk`]s.
///
/// A document with fewer words than `chunk_size` yields exactly one chunk;
/// a document with zero words yields none. The final window is clipped to
/// the remaining words, never duplicated or dropped.
pub fn chunk_document(doc: &Document, cfg: &ChunkingConfig) -> Vec<Chunk> {
    // (word, 1-based line, page) triples in document order.
    let words: Vec<(&str, usize, Option<u32>)> = doc
        .lines
        .iter()
        .enumerate()
        .flat_map(|(idx, line)| {
            let page = doc.line_pages.get(idx).copied().flatten();
            line.split_whitespace().map(move |w| (w, idx + 1, page))
        })
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    let step = cfg.chunk_size - cfg.overlap;
    let source_path = doc.path.to_string_lossy().to_string();

    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut ordinal = 0usize;

    loop {
        let end = (start + cfg.chunk_size).min(words.len());
        let window = &words[start..end];

        let text = window
            .iter()
            .map(|(w, _, _)| *w)
            .collect::<Vec<_>>()
            .join(" ");
        let line_start = window.iter().map(|(_, l, _)| *l).min().unwrap_or(1);
        let line_end = window.iter().map(|(_, l, _)| *l).max().unwrap_or(1);
        let page = window.first().and_then(|(_, _, p)| *p);

        chunks.push(Chunk {
            id: ids::chunk_id(&doc.id, ordinal, cfg.chunk_size, cfg.overlap),
            doc_id: doc.id.clone(),
            ordinal,
            text,
            source_path: source_path.clone(),
            page,
            line_start,
            line_end,
        });

        // Once a window reaches the end of the word sequence every word is
        // covered; another window would add nothing new.
        if end == words.len() {
            break;
        }
        ordinal += 1;
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc_from_lines(lines: &[&str]) -> Document {
        let line_pages = vec![None; lines.len()];
        Document {
            id: "doc0".to_string(),
            path: PathBuf::from("input/doc.txt"),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            line_pages,
            page_count: 0,
            empty_pages: Vec::new(),
        }
    }

    fn cfg(chunk_size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            overlap,
        }
    }

    #[test]
    fn twenty_five_words_size_ten_overlap_three() {
        let words: Vec<String> = (0..25).map(|i| format!("w{}", i)).collect();
        let doc = doc_from_lines(&[&words.join(" ")]);
        let chunks = chunk_document(&doc, &cfg(10, 3));

        // Start offsets 0, 7, 14, 21; final chunk clipped to 4 words.
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text.split_whitespace().next(), Some("w0"));
        assert_eq!(chunks[1].text.split_whitespace().next(), Some("w7"));
        assert_eq!(chunks[2].text.split_whitespace().next(), Some("w14"));
        assert_eq!(chunks[3].text.split_whitespace().next(), Some("w21"));
        assert_eq!(chunks[3].text.split_whitespace().count(), 4);
        assert_eq!(chunks[3].text.split_whitespace().last(), Some("w24"));
    }

    #[test]
    fn window_reaching_end_stops_without_contained_chunk() {
        // 17 words, size 10, overlap 3: window 7..17 reaches the end, so
        // no further window (14..17 would be fully contained in it).
        let words: Vec<String> = (0..17).map(|i| format!("w{}", i)).collect();
        let doc = doc_from_lines(&[&words.join(" ")]);
        let chunks = chunk_document(&doc, &cfg(10, 3));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text.split_whitespace().next(), Some("w0"));
        assert_eq!(chunks[1].text.split_whitespace().next(), Some("w7"));
        assert_eq!(chunks[1].text.split_whitespace().last(), Some("w16"));
    }

    #[test]
    fn exactly_chunk_size_words_yields_single_chunk() {
        let words: Vec<String> = (0..10).map(|i| format!("w{}", i)).collect();
        let doc = doc_from_lines(&[&words.join(" ")]);
        let chunks = chunk_document(&doc, &cfg(10, 3));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text.split_whitespace().count(), 10);
    }

    #[test]
    fn short_document_yields_single_chunk() {
        let doc = doc_from_lines(&["only a few words here"]);
        let chunks = chunk_document(&doc, &cfg(800, 120));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].ordinal, 0);
        assert_eq!(chunks[0].text, "only a few words here");
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let doc = doc_from_lines(&["", "   ", ""]);
        assert!(chunk_document(&doc, &cfg(800, 120)).is_empty());
    }

    #[test]
    fn coverage_has_no_gaps() {
        let words: Vec<String> = (0..103).map(|i| format!("w{}", i)).collect();
        let doc = doc_from_lines(&[&words.join(" ")]);
        let chunks = chunk_document(&doc, &cfg(20, 5));

        let mut covered = vec![false; 103];
        let mut expected_start = 0usize;
        for chunk in &chunks {
            let first: usize = chunk
                .text
                .split_whitespace()
                .next()
                .unwrap()
                .trim_start_matches('w')
                .parse()
                .unwrap();
            assert_eq!(first, expected_start);
            for w in chunk.text.split_whitespace() {
                let i: usize = w.trim_start_matches('w').parse().unwrap();
                covered[i] = true;
            }
            expected_start += 15;
        }
        assert!(covered.iter().all(|&c| c));
    }

    #[test]
    fn ordinals_increase_and_ids_are_deterministic() {
        let words: Vec<String> = (0..50).map(|i| format!("w{}", i)).collect();
        let doc = doc_from_lines(&[&words.join(" ")]);
        let a = chunk_document(&doc, &cfg(10, 2));
        let b = chunk_document(&doc, &cfg(10, 2));

        for (i, chunk) in a.iter().enumerate() {
            assert_eq!(chunk.ordinal, i);
        }
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.text, y.text);
        }

        // Different window config must change ids for the same document.
        let c = chunk_document(&doc, &cfg(10, 3));
        assert_ne!(a[0].id, c[0].id);
    }

    #[test]
    fn line_ranges_track_source_lines() {
        let doc = doc_from_lines(&["one two three", "four five", "", "six"]);
        let chunks = chunk_document(&doc, &cfg(4, 1));

        assert_eq!(chunks[0].line_start, 1);
        assert_eq!(chunks[0].line_end, 2);
        let last = chunks.last().unwrap();
        assert_eq!(last.line_end, 4);
    }

    #[test]
    fn page_is_first_words_page() {
        let mut doc = doc_from_lines(&["page one text", "page two text"]);
        doc.line_pages = vec![Some(1), Some(2)];
        doc.page_count = 2;
        let chunks = chunk_document(&doc, &cfg(4, 1));
        assert_eq!(chunks[0].page, Some(1));
        assert_eq!(chunks.last().unwrap().page, Some(2));
    }
}
