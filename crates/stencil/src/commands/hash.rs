//! Devcontainer context hash command

use crate::cli::HashFilesArgs;
use anyhow::Result;
use camino::Utf8Path;
use stencil_hash::{ContextFilter, Error, HashEngine, HashMode, HashOutcome};
use tracing::debug;

use super::load_config_from;

pub fn run(args: HashFilesArgs, config: Option<&Utf8Path>) -> Result<u8> {
    // stencil.yaml is looked up from the hashed repository
    let root = args
        .folder
        .canonicalize_utf8()
        .map_err(|_| Error::invalid_directory(args.folder.as_str()))?;
    let config = load_config_from(config, &root)?;
    let engine = HashEngine::git(ContextFilter::new(&config.hash));

    let mode = if args.for_devcontainer_config_update {
        HashMode::DevcontainerUpdate
    } else {
        HashMode::Report
    };

    debug!("Hashing {} in {:?} mode", args.folder, mode);
    let plan = engine.plan(&args.folder, mode)?;

    if args.debug {
        println!("Tracked files discovered:");
        for file in &plan.files {
            println!("{}", file);
        }
    }

    let outcome = engine.execute(&plan)?;
    match &outcome {
        HashOutcome::Reported(checksum) => println!("{}", checksum),
        HashOutcome::Updated {
            config_path,
            checksum,
            ..
        } => println!("Updated {} with the new hash: {}", config_path, checksum),
        HashOutcome::Unchanged { .. } => {}
    }

    Ok(outcome.exit_code(args.exit_zero))
}
