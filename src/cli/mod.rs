//! CLI command definitions and handlers

mod scan;

use crate::config;
use crate::report::ReportOptions;
use anyhow::Result;
use clap::Parser;
use std::path::Path;

/// Parse and validate the chunk size (at least 1)
fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("chunk size must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Blamerank - ranked git blame authorship reports
#[derive(Parser, Debug)]
#[command(name = "blamerank")]
#[command(
    version,
    about = "Rank committers by surviving blame lines across a source tree",
    long_about = "Blamerank walks the tree rooted at the current directory, runs git blame \
on every matching tracked file, and aggregates per-line authorship into a \
ranked committer report.\n\n\
Untracked files are skipped silently; lines without a blame annotation \
contribute nothing. Defaults for every flag can be set in blamerank.toml.",
    after_help = "\
Examples:
  blamerank                                  Rank committers for the current tree
  blamerank --ext rs --ext toml              Count only .rs and .toml files
  blamerank --search 'src/' --ignore-dir vendor
                                             Scan src/, never descend into vendor dirs
  blamerank --chunk-size 25                  Print a running snapshot every 25 files
  blamerank --committer Alice --committer Bob
                                             Only count files mentioning Alice or Bob
  blamerank --committer Alice --by-file      Alice's surviving lines, per file"
)]
pub struct Cli {
    /// Regex a directory path or full file path must match to be scanned
    #[arg(long, value_name = "REGEX")]
    pub search: Option<String>,

    /// File extension to include (repeatable; replaces the default py/tmpl set)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Regex of directory names to prune from the walk
    #[arg(long, value_name = "REGEX")]
    pub ignore_dir: Option<String>,

    /// Print a running snapshot of the ranking after every N blamed files
    #[arg(long, value_name = "N", value_parser = parse_chunk_size, conflicts_with = "by_file")]
    pub chunk_size: Option<usize>,

    /// Committer name or regex fragment to filter on (repeatable)
    #[arg(long = "committer", value_name = "NAME")]
    pub committers: Vec<String>,

    /// Report per-committer line counts per file instead of the global ranking
    #[arg(long)]
    pub by_file: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let root = Path::new(".");
    let config = config::load_project_config(root);

    // Explicit flags win over config-file defaults
    let options = scan::ScanOptions {
        search: cli
            .search
            .or(config.defaults.search)
            .unwrap_or_default(),
        extensions: if cli.extensions.is_empty() {
            config.defaults.extensions
        } else {
            cli.extensions
        },
        ignore_dir: cli.ignore_dir.or(config.defaults.ignore_dir),
        chunk_size: cli.chunk_size.or(config.defaults.chunk_size),
        committers: if cli.committers.is_empty() {
            config.defaults.committers
        } else {
            cli.committers
        },
        by_file: cli.by_file || config.defaults.by_file.unwrap_or(false),
        report: ReportOptions {
            max_committers: config.report.max_committers,
            min_blame_lines: config.report.min_blame_lines,
        },
        snapshot: ReportOptions {
            max_committers: Some(config.snapshot.max_committers),
            min_blame_lines: Some(config.snapshot.min_blame_lines),
        },
    };

    scan::run(root, &options)
}
