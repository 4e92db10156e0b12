//! Dependency sync across the repository's package environments
//!
//! `.devcontainer/envs.json` lists one entry per environment:
//!
//! ```json
//! [
//!   { "package_manager": "uv" },
//!   { "package_manager": "pnpm", "relative_directory": "frontend" }
//! ]
//! ```

use crate::ci::uv_environment;
use crate::error::{Error, Result};
use crate::process::CommandSpec;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fmt;
use std::fs;
use tracing::debug;

/// Package manager owning an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Uv,
    Pnpm,
}

impl PackageManager {
    pub fn lock_file(self) -> &'static str {
        match self {
            Self::Uv => "uv.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Ecosystem name used in skip messages
    fn ecosystem(self) -> &'static str {
        match self {
            Self::Uv => "Python",
            Self::Pnpm => "Node",
        }
    }

    fn exclusion_flag(self) -> &'static str {
        match self {
            Self::Uv => "--no-python",
            Self::Pnpm => "--no-node",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uv => f.write_str("uv"),
            Self::Pnpm => f.write_str("pnpm"),
        }
    }
}

/// One entry of `envs.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvConfig {
    pub package_manager: PackageManager,
    #[serde(default)]
    pub relative_directory: Option<String>,
}

impl EnvConfig {
    /// Environment directory under `root`
    pub fn directory(&self, root: &Utf8Path) -> Utf8PathBuf {
        match &self.relative_directory {
            Some(relative) => root.join(relative),
            None => root.to_owned(),
        }
    }
}

/// Load the environment list
pub fn load_envs(path: &Utf8Path) -> Result<Vec<EnvConfig>> {
    if !path.is_file() {
        return Err(Error::envs_config_not_found(path.as_str()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::json_parse(path.as_str(), e))
}

/// When to verify lock files before installing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockCheck {
    #[default]
    Always,
    Skip,
    /// Only for environments whose lock file exists
    IfPresent,
}

impl LockCheck {
    /// Resolve the two mutually exclusive CLI flags
    pub fn from_flags(skip: bool, optionally: bool) -> Result<Self> {
        match (skip, optionally) {
            (true, true) => Err(Error::ConflictingLockOptions),
            (true, false) => Ok(Self::Skip),
            (false, true) => Ok(Self::IfPresent),
            (false, false) => Ok(Self::Always),
        }
    }

    fn applies_to(self, lock_file: &Utf8Path) -> bool {
        match self {
            Self::Always => true,
            Self::Skip => false,
            Self::IfPresent => lock_file.exists(),
        }
    }
}

/// Sync settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub python: bool,
    pub node: bool,
    pub lock_check: LockCheck,
    /// Exported as `UV_PYTHON` when set
    pub python_version: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            python: true,
            node: true,
            lock_check: LockCheck::Always,
            python_version: None,
        }
    }
}

impl SyncOptions {
    fn includes(&self, manager: PackageManager) -> bool {
        match manager {
            PackageManager::Uv => self.python,
            PackageManager::Pnpm => self.node,
        }
    }
}

/// One planned action per environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStep {
    /// Environment excluded by `--no-python` / `--no-node`
    Skipped {
        directory: Utf8PathBuf,
        manager: PackageManager,
    },
    /// Commands to run for the environment, in order
    Install {
        directory: Utf8PathBuf,
        commands: Vec<CommandSpec>,
    },
}

impl SyncStep {
    /// Explanation printed for skipped environments
    pub fn skip_message(&self) -> Option<String> {
        match self {
            Self::Skipped { directory, manager } => Some(format!(
                "Skipping environment {} as it uses a {} package manager and {} is set",
                directory,
                manager.ecosystem(),
                manager.exclusion_flag()
            )),
            Self::Install { .. } => None,
        }
    }
}

/// Plan the install commands for every environment under `root`
pub fn plan_sync(root: &Utf8Path, envs: &[EnvConfig], options: &SyncOptions) -> Vec<SyncStep> {
    let uv_env = uv_environment(options.python_version.as_deref());

    envs.iter()
        .map(|env| {
            let directory = env.directory(root);
            let manager = env.package_manager;

            if !options.includes(manager) {
                return SyncStep::Skipped { directory, manager };
            }

            let check_lock = options
                .lock_check
                .applies_to(&directory.join(manager.lock_file()));
            debug!(
                "{} environment at {} (lock check: {})",
                manager, directory, check_lock
            );

            let commands = match manager {
                PackageManager::Uv => {
                    let mut commands = Vec::new();
                    if check_lock {
                        commands.push(
                            CommandSpec::new("uv")
                                .args(["lock", "--check", "--directory", directory.as_str()])
                                .envs(&uv_env),
                        );
                    }
                    let mut sync = CommandSpec::new("uv")
                        .args(["sync", "--directory", directory.as_str()])
                        .envs(&uv_env);
                    if check_lock {
                        sync = sync.arg("--frozen");
                    }
                    commands.push(sync);
                    commands
                }
                PackageManager::Pnpm => {
                    // pnpm has no standalone lock check; the frozen install covers it
                    let mut install =
                        CommandSpec::new("pnpm").args(["install", "--dir", directory.as_str()]);
                    if check_lock {
                        install = install.arg("--frozen-lockfile");
                    }
                    vec![install]
                }
            };

            SyncStep::Install {
                directory,
                commands,
            }
        })
        .collect()
}
