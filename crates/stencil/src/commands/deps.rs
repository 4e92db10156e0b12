//! Dependency sync command

use crate::cli::SyncDepsArgs;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use stencil_tooling::{load_envs, plan_sync, run_all, LockCheck, SyncOptions, SyncStep, SystemRunner};

use super::load_config;
use crate::output;

pub fn run(args: SyncDepsArgs, config: Option<&Utf8Path>) -> Result<()> {
    let lock_check = LockCheck::from_flags(args.skip_check_lock, args.optionally_check_lock)?;
    let config = load_config(config)?;

    let root = match args.repo_root {
        Some(root) => root,
        None => Utf8PathBuf::try_from(std::env::current_dir()?)
            .context("Current directory path is not valid UTF-8")?,
    };
    let envs = load_envs(&root.join(&config.tooling.envs_file))?;

    let options = SyncOptions {
        python: !args.no_python,
        node: !args.no_node,
        lock_check,
        python_version: args.python_version,
    };

    for step in plan_sync(&root, &envs, &options) {
        if let Some(message) = step.skip_message() {
            output::info(&message);
            continue;
        }
        let SyncStep::Install {
            directory,
            commands,
        } = step
        else {
            continue;
        };

        if args.dry_run {
            output::header(format!("Environment {}", directory));
            for spec in &commands {
                output::planned(spec);
            }
        } else {
            run_all(&SystemRunner, &commands)?;
            output::success(format!("Synced {}", directory));
        }
    }

    Ok(())
}
