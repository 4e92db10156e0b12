//! Tracked-file enumeration
//!
//! The default source asks git for its index listing. The trait is the seam
//! tests use to feed a fixed listing without a repository.

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::process::Command;
use tracing::debug;

/// Source of repository-relative tracked paths
pub trait TrackedFileSource {
    /// List tracked paths relative to `root`, in the source's own order
    fn tracked_files(&self, root: &Utf8Path) -> Result<Vec<String>>;
}

/// Lists tracked files with `git -C <root> ls-files`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitTrackedFiles;

impl TrackedFileSource for GitTrackedFiles {
    fn tracked_files(&self, root: &Utf8Path) -> Result<Vec<String>> {
        if which::which("git").is_err() {
            return Err(Error::repository_access(
                root.as_str(),
                "git executable not found in PATH",
            ));
        }

        debug!("Running: git -C {} ls-files -z", root);
        let output = Command::new("git")
            .arg("-C")
            .arg(root.as_std_path())
            .args(["ls-files", "-z"])
            .output()
            .map_err(|e| Error::repository_access(root.as_str(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::repository_access(root.as_str(), stderr.trim()));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            Error::repository_access(root.as_str(), "git ls-files returned non UTF-8 paths")
        })?;

        Ok(parse_ls_files(&stdout))
    }
}

/// Split NUL-terminated `ls-files -z` output
fn parse_ls_files(stdout: &str) -> Vec<String> {
    stdout
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
