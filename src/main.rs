// SPDX-License-Identifier: MIT
//
// quip: headless driver for the quip editing engine.
//
// Wires the crates together without a terminal:
//
//   quip-keys → chord expressions parsed into key sequences, keymap lookup
//   quip-core → document, selections, selectors, search, batch edits
//
// A run loads a file (or starts empty), optionally replaces the cursor with
// every match of a search pattern, plays a key sequence through a session,
// and prints the result:
//
//   file → Document → [--search] → SelectionSet → [--keys] → Session → stdout
//
// Logging goes to stderr and is filtered by RUST_LOG (default `warn`).

mod session;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use quip_core::{Document, SearchExpression};
use quip_keys::KeySequence;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

// ─── Command line ───────────────────────────────────────────────────────────

/// Edit a text file with multi-selection key commands and print the result.
#[derive(Debug, Parser)]
#[command(name = "quip", version, about)]
struct Cli {
    /// File to load. A missing file starts an empty document with that path.
    path: Option<PathBuf>,

    /// Keys to play, as a chord expression such as `wd` or `i<S-ab><ESC>`.
    #[arg(short, long, value_name = "EXPR")]
    keys: Option<String>,

    /// Select every match of this regular expression before playing keys.
    #[arg(short, long, value_name = "PATTERN")]
    search: Option<String>,

    /// Print the final selections instead of the document contents.
    #[arg(long)]
    selections: bool,
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Read `path`, treating a file that does not exist yet as empty.
fn load(path: &Path) -> Result<Document> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "new file");
            String::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let mut document = Document::new(&text);
    document.set_path(path);
    Ok(document)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let document = match &cli.path {
        Some(path) => load(path)?,
        None => Document::default(),
    };
    let mut session = Session::new(document);

    if let Some(pattern) = &cli.search {
        let expression = SearchExpression::new(pattern).context("--search")?;
        let found = session.document().matches(&expression);
        if found.is_empty() {
            warn!(pattern = %pattern, "search matched nothing");
        }
        session.set_selections(found);
    }

    if let Some(expression) = &cli.keys {
        let keys = KeySequence::parse(expression)
            .with_context(|| format!("invalid key expression `{expression}`"))?;
        session
            .feed(&keys)
            .with_context(|| format!("while playing `{expression}`"))?;
    }

    let mut out = io::stdout().lock();
    if cli.selections {
        let document = session.document();
        for selection in session.selections() {
            let text = document.contents_of(selection)?;
            writeln!(out, "{selection}\t{text:?}")?;
        }
    } else {
        out.write_all(session.document().contents().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
