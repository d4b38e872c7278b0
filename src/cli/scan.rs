//! Scan handler: select, blame, aggregate, report.
//!
//! Drives the sequential pipeline over the selected files. One file is
//! blamed and parsed before the next begins; the only blocking waits are
//! the git subprocess calls.

use crate::attribution::{AnnotationParser, CommitterFilter};
use crate::blame;
use crate::report::{self, ReportOptions};
use crate::selector::FileSelector;
use crate::tally::{CommitterTally, FileBreakdown};

use anyhow::{bail, Result};
use console::style;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Effective scan options after merging CLI flags over config defaults.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub search: String,
    pub extensions: Vec<String>,
    pub ignore_dir: Option<String>,
    pub chunk_size: Option<usize>,
    pub committers: Vec<String>,
    pub by_file: bool,
    /// Caps for the final report.
    pub report: ReportOptions,
    /// Caps for chunked intermediate snapshots.
    pub snapshot: ReportOptions,
}

/// Aggregation mode, settled before any file is touched.
enum Mode {
    Global(Option<CommitterFilter>),
    ByFile(CommitterFilter),
}

/// Run a scan rooted at `root` and print to stdout.
pub fn run(root: &Path, options: &ScanOptions) -> Result<()> {
    let selector = FileSelector::new(
        &options.search,
        &options.extensions,
        options.ignore_dir.as_deref(),
    )?;
    let parser = AnnotationParser::new()?;
    let filter = CommitterFilter::new(&options.committers)?;

    // Per-file counts are meaningless without committers to break them
    // down by; refuse before any work begins
    let mode = if options.by_file {
        match filter {
            Some(filter) => Mode::ByFile(filter),
            None => bail!("by-file reporting requires at least one committer filter"),
        }
    } else {
        Mode::Global(filter)
    };

    let files = selector.select(root);
    eprintln!(
        "{}Found {} matching files",
        style("✓ ").green(),
        style(files.len()).cyan()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match mode {
        Mode::ByFile(filter) => {
            scan_by_file(root, &files, &parser, &filter, &mut out)?;
        }
        Mode::Global(filter) => {
            scan_global(
                root,
                &files,
                &parser,
                filter.as_ref(),
                options.chunk_size,
                options.snapshot,
                options.report,
                &mut out,
            )?;
        }
    }

    Ok(())
}

/// Global tally mode: every attributed line of every admitted file
/// increments one committer map.
///
/// With a committer filter configured, admission is a whole-file gate on
/// the raw blame text; an admitted file still counts all of its
/// attributed lines, other committers' included.
#[allow(clippy::too_many_arguments)]
fn scan_global(
    root: &Path,
    files: &[PathBuf],
    parser: &AnnotationParser,
    filter: Option<&CommitterFilter>,
    chunk_size: Option<usize>,
    snapshot: ReportOptions,
    final_report: ReportOptions,
    out: &mut dyn Write,
) -> Result<CommitterTally> {
    let mut tally = CommitterTally::default();
    let mut blamed = 0usize;

    for path in files {
        if !blame::is_tracked(root, path) {
            debug!("skipping untracked {}", path.display());
            continue;
        }
        let Some(text) = blame::blame_file(root, path) else {
            continue;
        };
        blamed += 1;

        if filter.map_or(true, |f| f.mentions(&text)) {
            for line in text.lines() {
                if let Some(committer) = parser.committer_of(line) {
                    tally.record(committer);
                }
            }
        }

        // Running snapshot after each full chunk; counting continues
        if chunk_size.is_some_and(|n| blamed % n == 0) {
            write!(out, "{}", report::render(&tally, snapshot))?;
        }
    }

    write!(out, "{}", report::render(&tally, final_report))?;
    Ok(tally)
}

/// By-file mode: count only lines whose extracted committer passes the
/// filter, nested per committer per file, emitting each file's rows as
/// it is processed.
fn scan_by_file(
    root: &Path,
    files: &[PathBuf],
    parser: &AnnotationParser,
    filter: &CommitterFilter,
    out: &mut dyn Write,
) -> Result<FileBreakdown> {
    let mut breakdown = FileBreakdown::default();

    for path in files {
        if !blame::is_tracked(root, path) {
            debug!("skipping untracked {}", path.display());
            continue;
        }
        let Some(text) = blame::blame_file(root, path) else {
            continue;
        };
        // Same whole-file gate as the global mode; the counting below is
        // the stricter per-line path
        if !filter.mentions(&text) {
            continue;
        }

        let filename = path.to_string_lossy();
        let mut file_counts: BTreeMap<String, u64> = BTreeMap::new();
        for line in text.lines() {
            if let Some(committer) = parser.committer_of(line) {
                if filter.matches(committer) {
                    *file_counts.entry(committer.to_string()).or_insert(0) += 1;
                    breakdown.record(committer, &filename);
                }
            }
        }

        write!(out, "{}", report::render_file_counts(&filename, &file_counts))?;
    }

    Ok(breakdown)
}
