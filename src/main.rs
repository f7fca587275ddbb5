//! # Document Knowledge Converter CLI (`dkc`)
//!
//! The `dkc` binary drives the conversion pipeline: it builds knowledge
//! cards and chunks from a folder of documents, inspects single files, and
//! evaluates previously written card artifacts.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dkc build` | Convert an input folder into cards, chunks, and a manifest |
//! | `dkc inspect` | Build one card from a single file and print it as JSON |
//! | `dkc eval` | Compute completeness and citation coverage for a cards artifact |
//!
//! ## Examples
//!
//! ```bash
//! # Convert ./docs into ./out with default chunking (800 words, 120 overlap)
//! dkc build --input ./docs --out ./out
//!
//! # Narrower windows
//! dkc build --input ./docs --out ./out --chunk-size 400 --overlap 60
//!
//! # Look at one file's card
//! dkc inspect --file ./docs/report.pdf
//!
//! # Score a finished run
//! dkc eval --cards ./out/cards.jsonl
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dkc::{config, eval, pipeline};

/// Document Knowledge Converter — turn folders of text and PDF documents
/// into provenance-tracked knowledge cards and chunks.
#[derive(Parser)]
#[command(
    name = "dkc",
    about = "Convert folders of text and PDF documents into knowledge cards and chunks",
    version
)]
struct Cli {
    /// Path to an optional configuration file (TOML). CLI flags override
    /// file values; without either, built-in defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Convert every supported file under the input folder.
    ///
    /// Writes `cards.jsonl`, `chunks.jsonl`, and `manifest.json` into the
    /// output folder. Files that cannot be converted are recorded as
    /// manifest skips; the run continues past them.
    Build {
        /// Input folder containing documents.
        #[arg(long)]
        input: PathBuf,

        /// Output folder for the three artifacts.
        #[arg(long)]
        out: PathBuf,

        /// Chunk window size in words.
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Words shared between consecutive chunks (must be < chunk size).
        #[arg(long)]
        overlap: Option<usize>,
    },

    /// Build a single file's knowledge card and pretty-print it.
    Inspect {
        /// File to inspect (.txt, .md, or .pdf).
        #[arg(long)]
        file: PathBuf,
    },

    /// Evaluate a previously written cards artifact.
    ///
    /// Prints completeness (cards with at least one fact) and citation
    /// coverage (facts whose citation carries an excerpt and a location).
    Eval {
        /// Path to a `cards.jsonl` file.
        #[arg(long)]
        cards: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::default(),
    };

    match cli.command {
        Commands::Build {
            input,
            out,
            chunk_size,
            overlap,
        } => {
            if let Some(size) = chunk_size {
                cfg.chunking.chunk_size = size;
            }
            if let Some(overlap) = overlap {
                cfg.chunking.overlap = overlap;
            }
            pipeline::run_build(&cfg, &input, &out, chrono::Utc::now())?;
        }
        Commands::Inspect { file } => {
            let card = pipeline::inspect_file(&file, chrono::Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        Commands::Eval { cards } => {
            let metrics = eval::eval_cards(&cards)?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
    }

    Ok(())
}
