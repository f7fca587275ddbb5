//! # Document Knowledge Converter
//!
//! A batch pipeline that turns a folder of heterogeneous documents (plain
//! text, Markdown, PDF) into structured, provenance-tracked knowledge
//! artifacts: overlapping text chunks, per-document knowledge cards (facts,
//! acronyms, entities, citations), and a run manifest recording what was
//! processed and what was skipped.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────────────────┐   ┌───────────────┐
//! │  Loader  │──▶│  Chunker + Card Builder   │──▶│    Writer      │
//! │ txt/pdf  │   │  per-document, pure       │   │ JSONL + JSON  │
//! └──────────┘   └───────────────────────────┘   └──────┬────────┘
//!                                                       │
//!                                                ┌──────▼────────┐
//!                                                │   Evaluator   │
//!                                                │ cards metrics │
//!                                                └───────────────┘
//! ```
//!
//! Documents are processed one at a time in deterministic (lexicographic)
//! order. A file the loader cannot convert becomes a manifest skip entry;
//! the batch continues. All identifiers are SHA-256 digests of content and
//! configuration, so identical input always reproduces identical output.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and validation |
//! | [`models`] | Core data types |
//! | [`ids`] | Deterministic identifier derivation |
//! | [`loader`] | File discovery and text extraction |
//! | [`chunker`] | Overlapping word-window chunking |
//! | [`cards`] | Knowledge card heuristics |
//! | [`writer`] | Artifact serialization |
//! | [`eval`] | Metrics over written cards |
//! | [`pipeline`] | Batch orchestration |

pub mod cards;
pub mod chunker;
pub mod config;
pub mod eval;
pub mod ids;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod writer;
