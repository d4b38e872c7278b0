//! File selection for the blame scan
//!
//! Walks a directory tree and yields the files whose path and filename
//! pass the configured regex predicates. Directories whose name matches
//! the ignore pattern are pruned before descent, so none of their
//! descendants are ever visited.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename pattern used when no extension filters are configured.
const DEFAULT_FILENAME_PATTERN: &str = r".*\.(?:py|tmpl)";

/// Selects the files to blame.
///
/// A file is selected when its filename matches the filename pattern
/// (anchored at the start) and either its parent directory's path or its
/// full path matches the search pattern (unanchored). The empty search
/// pattern matches everything.
pub struct FileSelector {
    path_matcher: Regex,
    filename_matcher: Regex,
    directory_ignore_matcher: Option<Regex>,
}

impl FileSelector {
    /// Build a selector from user-supplied patterns.
    ///
    /// `extensions` entries are spliced verbatim into an alternation, so
    /// they may themselves be regex fragments. An empty list keeps the
    /// default `py`/`tmpl` pattern.
    pub fn new(search: &str, extensions: &[String], ignore_dir: Option<&str>) -> Result<Self> {
        let filename_pattern = if extensions.is_empty() {
            DEFAULT_FILENAME_PATTERN.to_string()
        } else {
            format!(r".*\.(?:{})", extensions.join("|"))
        };

        let path_matcher = Regex::new(search)
            .with_context(|| format!("invalid search pattern '{}'", search))?;
        // Anchor to emulate a match-at-start (prefix) test on the filename
        let filename_matcher = Regex::new(&format!("^(?:{})", filename_pattern))
            .with_context(|| format!("invalid filename pattern '{}'", filename_pattern))?;
        let directory_ignore_matcher = ignore_dir
            .map(|pat| {
                Regex::new(pat).with_context(|| format!("invalid ignore pattern '{}'", pat))
            })
            .transpose()?;

        Ok(Self {
            path_matcher,
            filename_matcher,
            directory_ignore_matcher,
        })
    }

    /// Collect the matching files under `root` in traversal order.
    ///
    /// The walk is single-threaded and sorted by file name, so the
    /// returned order is deterministic for an unchanged tree.
    pub fn select(&self, root: &Path) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(root);
        // Raw walk: hidden files and ignore files are all visible here;
        // untracked files are dropped later at the blame stage
        builder
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        if let Some(ignore_matcher) = self.directory_ignore_matcher.clone() {
            builder.filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if !is_dir {
                    return true;
                }
                !ignore_matcher.is_match(&entry.file_name().to_string_lossy())
            });
        }

        let mut selected = Vec::new();
        for entry in builder.build().filter_map(|e| e.ok()) {
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if self.matches(path) {
                selected.push(path.to_path_buf());
            }
        }

        debug!("selected {} files under {}", selected.len(), root.display());
        selected
    }

    /// Apply the selection predicate to a single file path.
    fn matches(&self, path: &Path) -> bool {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return false,
        };
        if !self.filename_matcher.is_match(&filename) {
            return false;
        }
        // A matching parent directory admits every file in it; otherwise
        // the full path itself must match
        let dir_matches = path
            .parent()
            .is_some_and(|dir| self.path_matcher.is_match(&dir.to_string_lossy()));
        dir_matches || self.path_matcher.is_match(&path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x\n").unwrap();
    }

    fn names(selected: &[PathBuf], root: &Path) -> Vec<String> {
        selected
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn selects_default_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.py"));
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("c.tmpl"));

        let selector = FileSelector::new("", &[], None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["a.py", "c.tmpl"]);
    }

    #[test]
    fn extension_list_replaces_default_pattern() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.py"));
        touch(&dir.path().join("b.rs"));
        touch(&dir.path().join("c.toml"));

        let exts = vec!["rs".to_string(), "toml".to_string()];
        let selector = FileSelector::new("", &exts, None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["b.rs", "c.toml"]);
    }

    #[test]
    fn filename_match_is_anchored_prefix() {
        let dir = tempfile::tempdir().unwrap();
        // Prefix match: a longer suffix after a matching stem still passes
        touch(&dir.path().join("a.pyc"));
        // No match at the start of the name
        touch(&dir.path().join("py"));

        let selector = FileSelector::new("", &[], None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["a.pyc"]);
    }

    #[test]
    fn search_pattern_admits_whole_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.py"));
        touch(&dir.path().join("web/views.py"));
        touch(&dir.path().join("web/static/app.py"));

        let selector = FileSelector::new("web", &[], None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["web/static/app.py", "web/views.py"]);
    }

    #[test]
    fn search_pattern_matches_full_path_for_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("models.py"));
        touch(&dir.path().join("lib/other.py"));

        let selector = FileSelector::new("models", &[], None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["models.py"]);
    }

    #[test]
    fn ignored_directories_are_pruned_with_descendants() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.py"));
        touch(&dir.path().join("vendor/b.py"));
        touch(&dir.path().join("vendor/deep/c.py"));
        touch(&dir.path().join("src/d.py"));

        let selector = FileSelector::new("", &[], Some("vendor")).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["a.py", "src/d.py"]);
    }

    #[test]
    fn unset_ignore_pattern_prunes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("vendor/b.py"));

        let selector = FileSelector::new("", &[], None).unwrap();
        let selected = names(&selector.select(dir.path()), dir.path());
        assert_eq!(selected, vec!["vendor/b.py"]);
    }

    #[test]
    fn traversal_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("z.py"));
        touch(&dir.path().join("a.py"));
        touch(&dir.path().join("mid/m.py"));

        let selector = FileSelector::new("", &[], None).unwrap();
        let first = selector.select(dir.path());
        let second = selector.select(dir.path());
        assert_eq!(first, second);
        assert_eq!(names(&first, dir.path()), vec!["a.py", "mid/m.py", "z.py"]);
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert!(FileSelector::new("(", &[], None).is_err());
        assert!(FileSelector::new("", &[], Some("[")).is_err());
    }
}
