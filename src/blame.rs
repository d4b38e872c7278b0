//! Git blame invocation
//!
//! The only module that touches an external process. Tracked-file checks
//! and blame both shell out to the `git` CLI in the scanned directory;
//! every failure at this boundary collapses into a skip, so an
//! unreachable or unhappy git never aborts a scan.

use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Whether `path` is tracked by the repository containing `root`.
///
/// Runs `git ls-files --error-unmatch`, which exits non-zero for
/// untracked paths. A failed invocation is indistinguishable from an
/// untracked file here; both mean the file is skipped.
pub fn is_tracked(root: &Path, path: &Path) -> bool {
    Command::new("git")
        .args(["ls-files", "--error-unmatch"])
        .arg(path)
        .current_dir(root)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Capture the blame output for a tracked file.
///
/// Blame lines are expected to carry an annotation of the shape
/// `(<committer name> <4-digit year>...)`; that format is a contract of
/// the external tool, parsed downstream with a single pattern. Returns
/// `None` only when the process could not be spawned; a non-zero exit
/// yields whatever stdout was produced, typically nothing.
pub fn blame_file(root: &Path, path: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("blame")
        .arg(path)
        .current_dir(root)
        .output();
    match output {
        Ok(out) => {
            if !out.status.success() {
                debug!("git blame exited non-zero for {}", path.display());
            }
            Some(String::from_utf8_lossy(&out.stdout).into_owned())
        }
        Err(err) => {
            debug!("git blame failed to spawn for {}: {}", path.display(), err);
            None
        }
    }
}
