//! Plain-text ranking reports
//!
//! Renders a committer tally as a divider line followed by ranked
//! `rank name :  count` rows. Renderers return the finished text; the
//! caller decides where it goes. Chunked scans reuse the same renderer
//! for intermediate snapshots.

use crate::tally::CommitterTally;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Divider printed above every ranking.
pub const DIVIDER: &str = "------------------------------";

/// Row caps for a rendered ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Stop after this many ranked entries have been visited.
    pub max_committers: Option<usize>,
    /// Print a row only when its count is strictly greater than this.
    /// An exactly-equal count is excluded.
    pub min_blame_lines: Option<u64>,
}

/// Render the ranked committer table.
///
/// Ranks are 1-based positions in the full descending order, assigned
/// before the threshold filter is applied; the row cap counts visited
/// entries the same way.
pub fn render(tally: &CommitterTally, opts: ReportOptions) -> String {
    let mut out = String::new();
    out.push_str(DIVIDER);
    out.push('\n');
    for (rank, (name, count)) in tally.ranked().into_iter().enumerate() {
        if opts.max_committers.is_some_and(|max| rank >= max) {
            break;
        }
        if opts.min_blame_lines.is_some_and(|min| count <= min) {
            continue;
        }
        let _ = writeln!(out, "{} {} :  {}", rank + 1, name, count);
    }
    out
}

/// Render the per-file rows for one scanned file.
///
/// One `filename count` row per committer entry, in the map's name
/// order. Emitted as files are processed, never re-sorted.
pub fn render_file_counts(filename: &str, counts: &BTreeMap<String, u64>) -> String {
    let mut out = String::new();
    for count in counts.values() {
        let _ = writeln!(out, "{} {}", filename, count);
    }
    out
}
