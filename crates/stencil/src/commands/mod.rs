//! CLI command implementations

pub mod context;
pub mod deps;
pub mod hash;
pub mod registries;
pub mod release;
pub mod tooling;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8Path;
use stencil_core::{ConfigLoader, StencilConfig};

/// Load stencil.yaml layered over the embedded defaults
pub(crate) fn load_config(explicit: Option<&Utf8Path>) -> Result<StencilConfig> {
    let loader = ConfigLoader::new(explicit)?;
    loader.load().context("Failed to load stencil configuration")
}

/// Load stencil.yaml searching upward from `start` unless `--config` names one
pub(crate) fn load_config_from(
    explicit: Option<&Utf8Path>,
    start: &Utf8Path,
) -> Result<StencilConfig> {
    let loader = match explicit {
        Some(_) => ConfigLoader::new(explicit)?,
        None => ConfigLoader::with_search_root(start.to_owned()),
    };
    loader.load().context("Failed to load stencil configuration")
}
