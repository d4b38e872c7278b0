//! Line attribution from blame output
//!
//! Blame annotations are parsed with a single pattern rather than a
//! grammar: the shortest token before whitespace and a 4-digit year
//! inside the parenthesized segment is the committer name. Whatever the
//! pattern captures is accepted verbatim, so names differing only in
//! whitespace are distinct identities.

use anyhow::{Context, Result};
use regex::Regex;

/// Extracts the committer name from blame annotation lines.
pub struct AnnotationParser {
    matcher: Regex,
}

impl AnnotationParser {
    pub fn new() -> Result<Self> {
        let matcher = Regex::new(r"\((.*?)\s*[0-9]{4}").context("invalid annotation pattern")?;
        Ok(Self { matcher })
    }

    /// The committer annotated on `line`, if any.
    ///
    /// Lines without a parseable annotation contribute no attribution.
    pub fn committer_of<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.matcher
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
    }
}

/// Committer name filter built from configured name fragments.
///
/// Names are joined into a single alternation and treated as regex
/// fragments, so a fragment matches anywhere inside a name. The filter
/// offers two distinct checks: a whole-file gate over raw blame text,
/// and a per-line check against an already-extracted committer. The two
/// are intentionally not unified; which one applies depends on the
/// report mode.
pub struct CommitterFilter {
    matcher: Regex,
}

impl CommitterFilter {
    /// Build a filter, or `None` when no names are configured.
    pub fn new(names: &[String]) -> Result<Option<Self>> {
        if names.is_empty() {
            return Ok(None);
        }
        let pattern = format!("(?:{})", names.join("|"));
        let matcher = Regex::new(&pattern)
            .with_context(|| format!("invalid committer pattern '{}'", pattern))?;
        Ok(Some(Self { matcher }))
    }

    /// Whole-file gate: does the raw blame text mention any configured
    /// committer anywhere? A single matching line admits the entire file.
    pub fn mentions(&self, blame_text: &str) -> bool {
        self.matcher.is_match(blame_text)
    }

    /// Per-line check against the extracted committer name.
    pub fn matches(&self, committer: &str) -> bool {
        self.matcher.is_match(committer)
    }
}
