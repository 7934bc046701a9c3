//! # Vellum - A Minimal Terminal Text Editor
//!
//! Loads a file into a line buffer, edits it under a fixed set of key
//! bindings, renders it with syntax-colored text, and writes it back.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open a file
//! cargo run -- path/to/file.rs
//!
//! # Start with an empty scratch buffer
//! cargo run
//!
//! # Logs go to stderr; redirect them somewhere useful
//! cargo run -- -vv path/to/file.rs 2>/tmp/vellum.log
//! ```
//!
//! Ctrl+S saves, Ctrl+Q quits.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vellum_core::{Config, EditorSession};
use vellum_syntax::{RuleLexer, detect_language};
use vellum_term::{CrosstermSurface, Theme};

/// Vellum - a minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Lexer language (overrides detection from the file name)
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging. Stdout belongs to the terminal surface, so log
    // lines go to stderr.
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting vellum v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    // CLI flag wins over config, which wins over file-name detection.
    let language = args
        .language
        .clone()
        .or_else(|| config.editor.language.clone())
        .unwrap_or_else(|| match &args.file {
            Some(path) => detect_language(&path.to_string_lossy()).to_string(),
            None => "plain".to_string(),
        });
    let lexer = RuleLexer::for_language(&language).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to the plain lexer");
        RuleLexer::plain()
    });

    let theme = Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using dark");
        Theme::dark()
    });

    // The surface restores the terminal on drop, whichever way run() ends.
    let surface = CrosstermSurface::new()?;
    let mut session = EditorSession::new(surface, Box::new(lexer), theme, args.file)?;
    session.run()?;

    Ok(())
}
