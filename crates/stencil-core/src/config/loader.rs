//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Project config (stencil.yaml, explicit path or found in cwd/parents)
//! 3. Environment variables (STENCIL_* prefix)
//! 4. CLI flags (handled by caller)

use crate::config::types::StencilConfig;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
pub(crate) struct EmbeddedConfigs;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["stencil.yaml", "stencil.yml"];

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Explicit project config path (from `--config`)
    explicit_path: Option<Utf8PathBuf>,

    /// Directory the upward search for stencil.yaml starts from
    search_root: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader that searches upward from the current directory
    pub fn new(explicit_path: Option<&Utf8Path>) -> Result<Self> {
        let cwd = env::current_dir()?;
        let search_root = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;

        Ok(Self {
            explicit_path: explicit_path.map(Utf8Path::to_owned),
            search_root,
        })
    }

    /// Create a loader with a custom search root
    pub fn with_search_root(search_root: Utf8PathBuf) -> Self {
        Self {
            explicit_path: None,
            search_root,
        }
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<StencilConfig> {
        let mut config = load_embedded_config::<StencilConfig>("defaults.yaml")?;

        if let Some(path) = self.project_config_path()? {
            debug!("Loading project config from {}", path);
            let file_config = load_yaml_file::<StencilConfig>(&path)?;
            config = merge_config(config, file_config);
        }

        apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Resolve the project config file, if any
    ///
    /// An explicit path must exist; the upward search is optional.
    pub fn project_config_path(&self) -> Result<Option<Utf8PathBuf>> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(Error::config_not_found(path.as_str()));
            }
            return Ok(Some(path.clone()));
        }

        let mut current = self.search_root.as_path();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Ok(Some(candidate));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }
    }
}

/// Load an embedded configuration file
pub(crate) fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
        Error::config_not_found(format!("Embedded config not found: {}", filename))
    })?;

    let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
        Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
    })?;

    let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
        Error::invalid_config(format!(
            "Failed to parse embedded config {}: {}",
            filename, e
        ))
    })?;

    Ok(config)
}

/// Load a YAML file and parse it
fn load_yaml_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let config: T = serde_yaml_ng::from_str(&content)
        .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
    Ok(config)
}

/// Merge two configs (base is overridden by overlay)
///
/// Sections are replaced whole; version pins are merged key by key.
fn merge_config(base: StencilConfig, overlay: StencilConfig) -> StencilConfig {
    let mut versions = base.versions;
    versions.extend(overlay.versions);

    StencilConfig {
        hash: overlay.hash,
        release: overlay.release,
        tooling: overlay.tooling,
        versions,
    }
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut StencilConfig) {
    if let Ok(val) = env::var("STENCIL_HASH_CONFIG_DIR") {
        config.hash.config_dir = val;
    }

    if let Ok(val) = env::var("STENCIL_HASH_CONFIG_FILENAME") {
        config.hash.config_filename = val;
    }

    if let Ok(val) = env::var("STENCIL_RELEASE_REMOTE") {
        config.release.remote = val;
    }

    if let Ok(val) = env::var("STENCIL_RELEASE_TAG_PREFIX") {
        config.release.tag_prefix = val;
    }

    if let Ok(val) = env::var("STENCIL_ENVS_FILE") {
        config.tooling.envs_file = val;
    }
}
