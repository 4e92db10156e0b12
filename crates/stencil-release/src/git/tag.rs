//! Remote tag checks and tag publishing

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

/// `git ls-remote --exit-code` status when no ref matched
const LS_REMOTE_NO_MATCH: i32 = 2;

/// Build the tag for a version, e.g. `v` + `1.2.3`
pub fn tag_name(prefix: &str, version: &str) -> String {
    format!("{prefix}{version}")
}

/// A git remote, queried and pushed to from a working directory
#[derive(Debug, Clone)]
pub struct TagRemote {
    remote: String,
    /// Repository to run git in; `None` uses the process working directory
    repo_dir: Option<Utf8PathBuf>,
}

impl TagRemote {
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            repo_dir: None,
        }
    }

    /// Run git inside `dir` instead of the current directory
    pub fn in_dir(mut self, dir: &Utf8Path) -> Self {
        self.repo_dir = Some(dir.to_owned());
        self
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Whether `refs/tags/<tag>` exists on the remote
    ///
    /// Exit status 0 means present and 2 means absent; anything else
    /// (unreachable remote, unknown remote name) is an error.
    pub fn tag_exists(&self, tag: &str) -> Result<bool> {
        let tag_ref = format!("refs/tags/{tag}");
        let output = self.git(&["ls-remote", "--exit-code", "--tags", &self.remote, &tag_ref])?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(LS_REMOTE_NO_MATCH) => Ok(false),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(Error::remote_query(&self.remote, stderr.trim()))
            }
        }
    }

    /// Fail with `TagExists` if the tag is already on the remote
    pub fn ensure_tag_not_present(&self, tag: &str) -> Result<()> {
        if self.tag_exists(tag)? {
            return Err(Error::tag_exists(tag, &self.remote));
        }
        debug!("Tag {} not present on remote {}", tag, self.remote);
        Ok(())
    }

    /// Check the tag is absent, create it locally, and push it
    pub fn create_and_push(&self, tag: &str) -> Result<()> {
        self.ensure_tag_not_present(tag)?;

        info!("Creating tag {}", tag);
        self.git_checked(&["tag", tag])?;

        info!("Pushing tag {} to {}", tag, self.remote);
        self.git_checked(&["push", &self.remote, tag])?;

        Ok(())
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        which::which("git").map_err(|_| Error::GitNotFound)?;

        let mut cmd = Command::new("git");
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        debug!("Running: git {}", args.join(" "));
        Ok(cmd.args(args).output()?)
    }

    fn git_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.git(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git_operation(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(())
    }
}
