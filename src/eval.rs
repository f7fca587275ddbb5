//! Quality metrics over a previously written cards artifact.
//!
//! The evaluator is a separate pass: it reads `cards.jsonl` back from disk
//! rather than reusing in-memory pipeline state, so it can score any run's
//! output. Malformed input surfaces as [`FormatError`], distinct from the
//! loader and writer error tiers.

use serde::Serialize;
use std::path::Path;

use crate::models::KnowledgeCard;

/// Artifact-level failure: the cards file is missing or unparseable.
#[derive(Debug)]
pub enum FormatError {
    Missing(String),
    Malformed { line: usize, message: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Missing(path) => write!(f, "cards artifact missing: {}", path),
            FormatError::Malformed { line, message } => {
                write!(f, "malformed cards artifact at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Aggregate quality metrics, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CardMetrics {
    /// Fraction of cards with at least one fact.
    pub completeness: f64,
    /// Fraction of (fact, citation) pairs whose citation has a non-empty
    /// excerpt and a populated location (page or line).
    pub citation_coverage: f64,
}

/// Read a cards artifact and compute [`CardMetrics`].
pub fn eval_cards(path: &Path) -> Result<CardMetrics, FormatError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| FormatError::Missing(path.display().to_string()))?;

    let mut cards = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let card: KnowledgeCard =
            serde_json::from_str(line).map_err(|e| FormatError::Malformed {
                line: idx + 1,
                message: e.to_string(),
            })?;
        cards.push(card);
    }

    if cards.is_empty() {
        return Ok(CardMetrics {
            completeness: 0.0,
            citation_coverage: 0.0,
        });
    }

    let with_facts = cards.iter().filter(|c| !c.facts.is_empty()).count();
    let completeness = with_facts as f64 / cards.len() as f64;

    let mut pairs = 0usize;
    let mut covered = 0usize;
    for card in &cards {
        for (idx, _fact) in card.facts.iter().enumerate() {
            pairs += 1;
            // A fact with no citation at all is an uncovered pair.
            let Some(citation) = card.citations.get(idx) else {
                continue;
            };
            let located = citation.page.is_some() || citation.line.is_some();
            if !citation.text_excerpt.is_empty() && located {
                covered += 1;
            }
        }
    }
    let citation_coverage = if pairs > 0 {
        covered as f64 / pairs as f64
    } else {
        0.0
    };

    Ok(CardMetrics {
        completeness,
        citation_coverage,
    })
}
