//! Project-level configuration support
//!
//! Loads per-project configuration from a `blamerank.toml` file in the
//! scanned directory. Every section is optional; a missing or malformed
//! file falls back to defaults with a warning.
//!
//! # Configuration Format
//!
//! ```toml
//! # blamerank.toml
//!
//! [defaults]
//! search = "src"
//! extensions = ["rs", "toml"]
//! ignore_dir = "vendor"
//! chunk_size = 25
//! committers = ["Alice"]
//! by_file = false
//!
//! [report]
//! max_committers = 30
//! min_blame_lines = 400
//!
//! [snapshot]
//! max_committers = 30
//! min_blame_lines = 400
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the config file looked up in the scanned directory.
const CONFIG_FILENAME: &str = "blamerank.toml";

/// Project-level configuration loaded from `blamerank.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Default CLI flag values; explicit flags win over these.
    #[serde(default)]
    pub defaults: CliDefaults,

    /// Caps applied to the final report. Unset means uncapped.
    #[serde(default)]
    pub report: ReportDefaults,

    /// Caps applied to chunked intermediate snapshots.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Default values for the CLI flags.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Path-include regex.
    #[serde(default)]
    pub search: Option<String>,

    /// Extension filters replacing the built-in filename pattern.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Directory-name prune pattern.
    #[serde(default)]
    pub ignore_dir: Option<String>,

    /// Snapshot interval in files.
    #[serde(default)]
    pub chunk_size: Option<usize>,

    /// Committer name fragments to filter on.
    #[serde(default)]
    pub committers: Vec<String>,

    /// Per-committer-per-file report mode.
    #[serde(default)]
    pub by_file: Option<bool>,
}

/// Row caps for the final report.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct ReportDefaults {
    #[serde(default)]
    pub max_committers: Option<usize>,

    #[serde(default)]
    pub min_blame_lines: Option<u64>,
}

/// Row caps for chunked intermediate snapshots.
///
/// Snapshots are running, non-final rankings, so they default to a tight
/// view: at most 30 committers, each above 400 lines.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_max_committers")]
    pub max_committers: usize,

    #[serde(default = "default_snapshot_min_blame_lines")]
    pub min_blame_lines: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_committers: default_snapshot_max_committers(),
            min_blame_lines: default_snapshot_min_blame_lines(),
        }
    }
}

fn default_snapshot_max_committers() -> usize {
    30
}

fn default_snapshot_min_blame_lines() -> u64 {
    400
}

/// Load project configuration from `dir`, falling back to defaults.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        debug!("No project config found, using defaults");
        return ProjectConfig::default();
    }

    match load_toml_config(&config_path) {
        Ok(config) => {
            debug!("Loaded project config from {}", config_path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", config_path.display(), e);
            ProjectConfig::default()
        }
    }
}

/// Load configuration from a TOML file.
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_project_config(dir.path());
        assert!(config.defaults.search.is_none());
        assert!(config.defaults.extensions.is_empty());
        assert_eq!(config.snapshot.max_committers, 30);
        assert_eq!(config.snapshot.min_blame_lines, 400);
        assert!(config.report.max_committers.is_none());
    }

    #[test]
    fn full_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("blamerank.toml"),
            r#"
[defaults]
search = "src"
extensions = ["rs", "toml"]
ignore_dir = "target"
chunk_size = 10
committers = ["Alice", "Bob"]
by_file = true

[report]
max_committers = 5
min_blame_lines = 2

[snapshot]
max_committers = 8
min_blame_lines = 100
"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.search.as_deref(), Some("src"));
        assert_eq!(config.defaults.extensions, vec!["rs", "toml"]);
        assert_eq!(config.defaults.ignore_dir.as_deref(), Some("target"));
        assert_eq!(config.defaults.chunk_size, Some(10));
        assert_eq!(config.defaults.committers, vec!["Alice", "Bob"]);
        assert_eq!(config.defaults.by_file, Some(true));
        assert_eq!(config.report.max_committers, Some(5));
        assert_eq!(config.report.min_blame_lines, Some(2));
        assert_eq!(config.snapshot.max_committers, 8);
        assert_eq!(config.snapshot.min_blame_lines, 100);
    }

    #[test]
    fn partial_config_keeps_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("blamerank.toml"),
            "[defaults]\nsearch = \"web\"\n",
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.defaults.search.as_deref(), Some("web"));
        assert_eq!(config.snapshot.max_committers, 30);
        assert_eq!(config.snapshot.min_blame_lines, 400);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blamerank.toml"), "not [ valid toml").unwrap();

        let config = load_project_config(dir.path());
        assert!(config.defaults.search.is_none());
        assert_eq!(config.snapshot.max_committers, 30);
    }
}
