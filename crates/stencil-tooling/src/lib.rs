//! # stencil-tooling
//!
//! Plans and runs the external commands that prepare a machine for working on
//! a template repository:
//! - CI tooling: uv, copier, pre-commit, pnpm at pinned versions
//! - Dependency sync: `uv sync` / `pnpm install` for every environment listed
//!   in `.devcontainer/envs.json`
//!
//! Planning is pure and returns [`CommandSpec`]s; a [`CommandRunner`] executes
//! them, so a dry run is just printing the plan.

pub mod ci;
pub mod deps;
pub mod error;
pub mod process;

pub use ci::{plan_ci_tooling, CiToolingOptions};
pub use deps::{load_envs, plan_sync, EnvConfig, LockCheck, PackageManager, SyncOptions, SyncStep};
pub use error::{Error, Result};
pub use process::{run_all, CommandRunner, CommandSpec, SystemRunner};
