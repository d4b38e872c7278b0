//! Aggregation of blame attributions
//!
//! `CommitterTally` accumulates global per-committer line counts across a
//! scan; `FileBreakdown` nests counts per committer per file for the
//! by-file report mode. Both live for a single run and are owned by the
//! scan loop that fills them.

use std::collections::BTreeMap;

/// Cumulative line counts per committer display name.
///
/// Names are stored as extracted, not normalized. The ordered map gives
/// ranked output a deterministic tie order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitterTally {
    counts: BTreeMap<String, u64>,
}

impl CommitterTally {
    /// Attribute one line to `committer`.
    pub fn record(&mut self, committer: &str) {
        *self.counts.entry(committer.to_string()).or_insert(0) += 1;
    }

    /// Lines attributed to `committer` so far.
    pub fn count(&self, committer: &str) -> u64 {
        self.counts.get(committer).copied().unwrap_or(0)
    }

    /// Total attributed lines across all committers.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Committers ranked by descending line count.
    ///
    /// The sort is stable over the map's name order, so equal counts
    /// rank alphabetically.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

/// Per-committer, per-file line counts for the by-file report mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBreakdown {
    counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl FileBreakdown {
    /// Attribute one line of `filename` to `committer`.
    pub fn record(&mut self, committer: &str, filename: &str) {
        *self
            .counts
            .entry(committer.to_string())
            .or_default()
            .entry(filename.to_string())
            .or_insert(0) += 1;
    }

    /// Lines attributed to `committer` within `filename`.
    pub fn count(&self, committer: &str, filename: &str) -> u64 {
        self.counts
            .get(committer)
            .and_then(|files| files.get(filename))
            .copied()
            .unwrap_or(0)
    }

    /// Per-file counts for one committer, in filename order.
    pub fn files_of(&self, committer: &str) -> Option<&BTreeMap<String, u64>> {
        self.counts.get(committer)
    }
}
