//! Knowledge card derivation.
//!
//! Builds one [`KnowledgeCard`] per successfully loaded document using
//! lightweight, pure heuristics: a line-scoring pass for facts, token scans
//! for acronyms and capitalized-run entities, and a first-line/file-stem
//! title rule. The keyword and stop-word sets are deliberate configuration
//! constants, not an attempt at real natural-language analysis.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::ids;
use crate::models::{Citation, Document, KnowledgeCard};

/// Upper bound on facts per card.
const MAX_FACTS: usize = 5;
/// Line length range (in chars) that earns the length signal.
const FACT_LEN_RANGE: std::ops::RangeInclusive<usize> = 20..=200;
/// First non-blank lines longer than this fall back to the file stem.
const MAX_TITLE_LEN: usize = 80;
/// Citation excerpts are clipped to this many chars.
const EXCERPT_MAX: usize = 200;
/// The ALL-CAPS penalty needs at least this many letters; "OK" or "A" on
/// a line is not shouting.
const MIN_CAPS_LETTERS: usize = 3;

/// Domain keywords that mark a line as summary-bearing. First match only.
const KEYWORDS: &[&str] = &[
    "summary",
    "finding",
    "findings",
    "conclusion",
    "result",
    "results",
    "objective",
    "purpose",
    "method",
    "approach",
    "recommendation",
    "decision",
    "impact",
    "significant",
    "key",
];

/// Capitalized tokens never treated as entities on their own.
const STOP_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "There", "Then", "They", "Their", "A", "An", "And",
    "But", "Or", "If", "It", "Its", "In", "On", "At", "As", "By", "To", "Of", "For", "From",
    "With", "We", "Our", "You", "Your", "Is", "Are", "Was", "Were", "Be", "Not", "No", "All",
    "Each", "When", "Where", "While", "How", "What", "Who", "Why",
];

static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,6}\b").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Score one line for fact-worthiness. Independent additive signals:
/// terminal punctuation, domain keyword, bullet marker, acceptable length,
/// and an ALL-CAPS penalty. Lines scoring > 0 are fact candidates.
pub fn score_line(line: &str) -> i32 {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let mut score = 0;

    if trimmed.ends_with(['.', '!', '?']) {
        score += 1;
    }

    let lower = trimmed.to_lowercase();
    if KEYWORDS.iter().any(|k| lower.contains(k)) {
        score += 1;
    }

    if has_bullet_marker(trimmed) {
        score += 1;
    }

    if FACT_LEN_RANGE.contains(&trimmed.chars().count()) {
        score += 1;
    }

    if is_all_caps(trimmed) {
        score -= 1;
    }

    score
}

fn has_bullet_marker(line: &str) -> bool {
    if line.starts_with("- ") || line.starts_with("* ") || line.starts_with("\u{2022}") {
        return true;
    }
    // Numbered list markers: "1." / "12)" etc.
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    matches!(line[digits.len()..].chars().next(), Some('.') | Some(')'))
}

fn is_all_caps(line: &str) -> bool {
    let mut letters = 0usize;
    for c in line.chars() {
        if c.is_alphabetic() {
            if c.is_lowercase() {
                return false;
            }
            letters += 1;
        }
    }
    letters >= MIN_CAPS_LETTERS
}

/// Fact candidates: (1-based line number, text) of the top-scoring lines,
/// ordered by descending score then ascending line number, capped at
/// [`MAX_FACTS`].
fn extract_facts(doc: &Document) -> Vec<(usize, String)> {
    let mut candidates: Vec<(i32, usize, &str)> = doc
        .lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let score = score_line(line);
            (score > 0).then(|| (score, idx + 1, line.trim()))
        })
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    candidates
        .into_iter()
        .take(MAX_FACTS)
        .map(|(_, line_no, text)| (line_no, text.to_string()))
        .collect()
}

/// Runs of 2–6 uppercase letters, deduplicated in order of first appearance.
fn extract_acronyms(doc: &Document) -> Vec<String> {
    let mut seen = Vec::new();
    for line in &doc.lines {
        for m in ACRONYM_RE.find_iter(line) {
            let token = m.as_str();
            if !seen.iter().any(|s| s == token) {
                seen.push(token.to_string());
            }
        }
    }
    seen
}

/// Capitalized single tokens and adjacent capitalized runs, with leading
/// stop-words stripped, deduplicated case-sensitively in first-occurrence
/// order.
fn extract_entities(doc: &Document) -> Vec<String> {
    let mut seen = Vec::new();
    for line in &doc.lines {
        for m in ENTITY_RE.find_iter(line) {
            let words: Vec<&str> = m
                .as_str()
                .split_whitespace()
                .skip_while(|w| STOP_WORDS.contains(w))
                .collect();
            if words.is_empty() {
                continue;
            }
            let entity = words.join(" ");
            if !seen.iter().any(|s| s == &entity) {
                seen.push(entity);
            }
        }
    }
    seen
}

/// First non-blank line when it reads like a heading (short, no terminal
/// punctuation); otherwise the file stem.
fn derive_title(doc: &Document) -> String {
    let heading = doc
        .lines
        .iter()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .find(|trimmed| !trimmed.is_empty())
        .filter(|trimmed| {
            let short = trimmed.chars().count() < MAX_TITLE_LEN;
            let sentence_like = trimmed.ends_with(['.', '!', '?']);
            short && !sentence_like
        })
        .map(|t| t.to_string());

    heading.unwrap_or_else(|| {
        doc.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| doc.path.to_string_lossy().to_string())
    })
}

/// A `YYYY-MM-DD` found in the filename or leading lines, else the run date.
fn detect_date(doc: &Document, created_at: DateTime<Utc>) -> String {
    let file_name = doc.path.file_name().map(|n| n.to_string_lossy().to_string());
    if let Some(name) = file_name {
        if let Some(m) = DATE_RE.find(&name) {
            return m.as_str().to_string();
        }
    }
    for line in doc.lines.iter().take(10) {
        if let Some(m) = DATE_RE.find(line) {
            return m.as_str().to_string();
        }
    }
    created_at.format("%Y-%m-%d").to_string()
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX {
        return text.to_string();
    }
    text.chars().take(EXCERPT_MAX).collect()
}

/// Build the knowledge card for one document.
///
/// Every fact gets exactly one citation pointing back at its source line
/// (and page, for page-oriented sources). A document with zero usable lines
/// produces a card with empty collections; that is not an error.
pub fn build_card(doc: &Document, created_at: DateTime<Utc>) -> KnowledgeCard {
    let source_path = doc.path.to_string_lossy().to_string();
    let facts = extract_facts(doc);

    let citations: Vec<Citation> = facts
        .iter()
        .map(|(line_no, text)| Citation {
            doc_id: doc.id.clone(),
            source_path: source_path.clone(),
            text_excerpt: excerpt(text),
            page: doc.line_pages.get(line_no - 1).copied().flatten(),
            line: Some(*line_no),
        })
        .collect();

    KnowledgeCard {
        id: ids::card_id(&doc.id),
        title: derive_title(doc),
        date: detect_date(doc, created_at),
        source_path,
        facts: facts.into_iter().map(|(_, text)| text).collect(),
        acronyms: extract_acronyms(doc),
        entities: extract_entities(doc),
        citations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn doc_from_lines(name: &str, lines: &[&str]) -> Document {
        Document {
            id: "doc0".to_string(),
            path: PathBuf::from(format!("input/{}", name)),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            line_pages: vec![None; lines.len()],
            page_count: 0,
            empty_pages: Vec::new(),
        }
    }

    fn run_ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn summary_line_beats_all_caps_line() {
        let doc = doc_from_lines("notes.txt", &["Summary of findings.", "RANDOM LINE"]);
        let card = build_card(&doc, run_ts());

        assert_eq!(card.facts, vec!["Summary of findings."]);
        assert!(score_line("RANDOM LINE") <= 0);
        assert_eq!(card.citations.len(), 1);
        assert_eq!(card.citations[0].line, Some(1));
        assert_eq!(card.citations[0].text_excerpt, "Summary of findings.");
    }

    #[test]
    fn scoring_signals_are_independent() {
        // punctuation + keyword + length
        assert_eq!(score_line("The results were strong overall."), 3);
        // bullet + punctuation + length
        assert_eq!(score_line("- a bullet point that ends here."), 3);
        // keyword counted once even when several match
        assert_eq!(
            score_line("Summary of results and findings with conclusion notes."),
            3
        );
        // ALL-CAPS penalty drags a heading negative
        assert!(score_line("RANDOM LINE") < 0);
    }

    #[test]
    fn caps_penalty_needs_three_letters() {
        // Short uppercase tokens are not shouting.
        assert_eq!(score_line("OK"), 0);
        assert_eq!(score_line("NO"), 0);
        // Three uppercase letters is enough to penalize.
        assert_eq!(score_line("FYI"), -1);
        assert!(score_line("RANDOM LINE") < 0);
    }

    #[test]
    fn at_most_five_facts_one_citation_each() {
        let lines: Vec<String> = (0..12)
            .map(|i| format!("Finding number {} was confirmed by review.", i))
            .collect();
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let doc = doc_from_lines("report.txt", &refs);
        let card = build_card(&doc, run_ts());

        assert_eq!(card.facts.len(), 5);
        assert_eq!(card.citations.len(), 5);
        // Equal scores break ties by original line order.
        assert_eq!(card.citations[0].line, Some(1));
        assert_eq!(card.citations[4].line, Some(5));
        for citation in &card.citations {
            assert!(!citation.text_excerpt.is_empty());
            assert!(citation.line.is_some());
        }
    }

    #[test]
    fn higher_scores_sort_first() {
        let doc = doc_from_lines(
            "report.txt",
            &[
                "plain sentence with enough length to pass.",
                "- Summary of the key results and decisions made this quarter.",
            ],
        );
        let card = build_card(&doc, run_ts());
        assert_eq!(
            card.facts[0],
            "- Summary of the key results and decisions made this quarter."
        );
        assert_eq!(card.citations[0].line, Some(2));
    }

    #[test]
    fn acronyms_first_appearance_deduped() {
        let doc = doc_from_lines(
            "notes.txt",
            &["NASA works with ESA.", "Later NASA signed with JAXA."],
        );
        let card = build_card(&doc, run_ts());
        assert_eq!(card.acronyms, vec!["NASA", "ESA", "JAXA"]);
    }

    #[test]
    fn acronym_length_bounds() {
        let doc = doc_from_lines("notes.txt", &["AB ABCDEFGH I XY ABCDEF"]);
        let card = build_card(&doc, run_ts());
        // 2-6 uppercase letters only; 1-letter and 8-letter runs excluded.
        assert_eq!(card.acronyms, vec!["AB", "XY", "ABCDEF"]);
    }

    #[test]
    fn entities_skip_stop_words_and_merge_runs() {
        let doc = doc_from_lines(
            "notes.txt",
            &[
                "The team visited New York City last week.",
                "This confirmed what Alice reported about New York City.",
            ],
        );
        let card = build_card(&doc, run_ts());
        assert!(card.entities.contains(&"New York City".to_string()));
        assert!(card.entities.contains(&"Alice".to_string()));
        assert!(!card.entities.contains(&"The".to_string()));
        assert!(!card.entities.contains(&"This".to_string()));
        // Deduplicated: one New York City despite two mentions.
        let nyc = card
            .entities
            .iter()
            .filter(|e| e.as_str() == "New York City")
            .count();
        assert_eq!(nyc, 1);
    }

    #[test]
    fn title_from_short_heading() {
        let doc = doc_from_lines("q3.md", &["# Quarterly Review", "", "Body text here."]);
        let card = build_card(&doc, run_ts());
        assert_eq!(card.title, "Quarterly Review");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let long_line = "This opening line is a full sentence that ends with punctuation.";
        let doc = doc_from_lines("meeting-notes.txt", &[long_line]);
        let card = build_card(&doc, run_ts());
        assert_eq!(card.title, "meeting-notes");
    }

    #[test]
    fn date_detected_from_filename() {
        let doc = doc_from_lines("report-2023-11-05.txt", &["Summary of findings."]);
        let card = build_card(&doc, run_ts());
        assert_eq!(card.date, "2023-11-05");
    }

    #[test]
    fn date_falls_back_to_run_date() {
        let doc = doc_from_lines("notes.txt", &["Summary of findings."]);
        let card = build_card(&doc, run_ts());
        assert_eq!(card.date, "2024-03-01");
    }

    #[test]
    fn zero_usable_lines_is_not_an_error() {
        let doc = doc_from_lines("hollow.txt", &["", "  ", ""]);
        let card = build_card(&doc, run_ts());
        assert!(card.facts.is_empty());
        assert!(card.acronyms.is_empty());
        assert!(card.entities.is_empty());
        assert!(card.citations.is_empty());
        assert_eq!(card.title, "hollow");
    }

    #[test]
    fn pdf_citation_carries_page() {
        let mut doc = doc_from_lines("paper.pdf", &["Summary of findings."]);
        doc.line_pages = vec![Some(3)];
        doc.page_count = 3;
        let card = build_card(&doc, run_ts());
        assert_eq!(card.citations[0].page, Some(3));
    }
}
