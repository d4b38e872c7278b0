//! Blamerank - ranked git blame authorship reports
//!
//! Walks the source tree rooted at the working directory, blames each
//! matching tracked file, and aggregates per-committer line counts into
//! a ranked report.

// Allow dead code for accessors on the aggregation types, exercised mainly by tests
#![allow(dead_code)]

mod attribution;
mod blame;
mod cli;
mod config;
mod report;
mod selector;
mod tally;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging; traces go to stderr so the report stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
