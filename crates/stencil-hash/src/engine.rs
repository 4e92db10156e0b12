//! Hash orchestration
//!
//! `plan` does everything that cannot modify the repository (enumeration and
//! filtering), so callers can print the file list before `execute` computes
//! the checksum and, in update mode, rewrites the config file.

use crate::annotation::{extract_current_hash, update_hash};
use crate::checksum::{compute_checksum, Checksum};
use crate::error::{Error, Result};
use crate::filter::ContextFilter;
use crate::tracked::{GitTrackedFiles, TrackedFileSource};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// What the run is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMode {
    /// Checksum every tracked file and report it
    Report,
    /// Checksum the devcontainer context and keep the config annotation current
    DevcontainerUpdate,
}

/// Files a run will hash, resolved before any checksum work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashPlan {
    pub root: Utf8PathBuf,
    pub mode: HashMode,
    /// Repository-relative paths fed to the checksum
    pub files: Vec<String>,
    /// Repository-relative config path, set in update mode only
    pub config_path: Option<String>,
}

/// Result of executing a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashOutcome {
    /// Report mode: the checksum over all tracked files
    Reported(Checksum),
    /// Update mode: the recorded hash already matched
    Unchanged {
        config_path: String,
        checksum: Checksum,
    },
    /// Update mode: the hash line was inserted or replaced
    Updated {
        config_path: String,
        previous: Option<String>,
        checksum: Checksum,
    },
}

impl HashOutcome {
    pub fn checksum(&self) -> Checksum {
        match self {
            Self::Reported(checksum)
            | Self::Unchanged { checksum, .. }
            | Self::Updated { checksum, .. } => *checksum,
        }
    }

    /// Process exit status: a rewritten config fails the run unless `exit_zero`
    pub fn exit_code(&self, exit_zero: bool) -> u8 {
        match self {
            Self::Updated { .. } if !exit_zero => 1,
            _ => 0,
        }
    }
}

/// Drives enumeration, filtering, checksum and annotation
pub struct HashEngine<S: TrackedFileSource> {
    source: S,
    filter: ContextFilter,
}

impl HashEngine<GitTrackedFiles> {
    /// Engine backed by `git ls-files`
    pub fn git(filter: ContextFilter) -> Self {
        Self::new(GitTrackedFiles, filter)
    }
}

impl<S: TrackedFileSource> HashEngine<S> {
    pub fn new(source: S, filter: ContextFilter) -> Self {
        Self { source, filter }
    }

    /// Enumerate and filter without touching any file
    pub fn plan(&self, root: &Utf8Path, mode: HashMode) -> Result<HashPlan> {
        if !root.is_dir() {
            return Err(Error::invalid_directory(root.as_str()));
        }

        let tracked = self.source.tracked_files(root)?;
        debug!("{} tracked files under {}", tracked.len(), root);

        let (files, config_path) = match mode {
            HashMode::Report => (tracked, None),
            HashMode::DevcontainerUpdate => {
                let selection = self.filter.select(&tracked)?;
                (selection.selected, Some(selection.config_path))
            }
        };

        Ok(HashPlan {
            root: root.to_owned(),
            mode,
            files,
            config_path,
        })
    }

    /// Compute the checksum and, in update mode, reconcile the config file
    pub fn execute(&self, plan: &HashPlan) -> Result<HashOutcome> {
        let checksum = compute_checksum(&plan.root, &plan.files)?;

        let config_path = match (plan.mode, &plan.config_path) {
            (HashMode::DevcontainerUpdate, Some(path)) => path.clone(),
            (HashMode::DevcontainerUpdate, None) => {
                return Err(Error::missing_config_file(self.filter.config_filename()))
            }
            (HashMode::Report, _) => return Ok(HashOutcome::Reported(checksum)),
        };

        let absolute = plan.root.join(&config_path);
        let previous = extract_current_hash(&absolute)?;
        let computed = checksum.to_hex();

        if previous.as_deref() == Some(computed.as_str()) {
            debug!("{} already carries hash {}", config_path, computed);
            return Ok(HashOutcome::Unchanged {
                config_path,
                checksum,
            });
        }

        update_hash(&absolute, &computed)?;
        info!(
            "Rewrote hash in {}: {} -> {}",
            config_path,
            previous.as_deref().unwrap_or("<none>"),
            computed
        );

        Ok(HashOutcome::Updated {
            config_path,
            previous,
            checksum,
        })
    }

    /// `plan` followed by `execute`
    pub fn run(&self, root: &Utf8Path, mode: HashMode) -> Result<HashOutcome> {
        let plan = self.plan(root, mode)?;
        self.execute(&plan)
    }
}
