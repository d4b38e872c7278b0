//! Configuration module for Blamerank
//!
//! Handles project-level configuration (`blamerank.toml`): default CLI
//! flag values, final-report caps, and chunked-snapshot caps.

mod project_config;

pub use project_config::{
    load_project_config, CliDefaults, ProjectConfig, ReportDefaults, SnapshotConfig,
};
