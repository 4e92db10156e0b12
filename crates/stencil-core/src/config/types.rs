//! Configuration types for stencil.yaml
//!
//! Every section carries serde defaults matching `embedded/config/defaults.yaml`,
//! so a project file only needs the sections it changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete stencil configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StencilConfig {
    /// Devcontainer context hash settings
    #[serde(default)]
    pub hash: HashConfig,

    /// Release tagging settings
    #[serde(default)]
    pub release: ReleaseConfig,

    /// CI tooling and dependency sync settings
    #[serde(default)]
    pub tooling: ToolingConfig,

    /// Version pin overrides, merged over the embedded pin table
    #[serde(default)]
    pub versions: BTreeMap<String, serde_json::Value>,
}

/// Which tracked files make up the devcontainer context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HashConfig {
    /// Reserved configuration directory (every tracked path under it is hashed)
    #[serde(default = "default_config_dir")]
    pub config_dir: String,

    /// File name suffix identifying the config file that carries the hash line
    #[serde(default = "default_config_filename")]
    pub config_filename: String,

    /// Any tracked path ending in one of these is hashed
    #[serde(default = "default_context_suffixes")]
    pub context_suffixes: Vec<String>,

    /// Tracked paths hashed on an exact match
    #[serde(default = "default_context_exact_paths")]
    pub context_exact_paths: Vec<String>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            config_filename: default_config_filename(),
            context_suffixes: default_context_suffixes(),
            context_exact_paths: default_context_exact_paths(),
        }
    }
}

fn default_config_dir() -> String {
    ".devcontainer/".to_string()
}
fn default_config_filename() -> String {
    "devcontainer.json".to_string()
}
fn default_context_suffixes() -> Vec<String> {
    vec![
        ".lock".to_string(),
        "pnpm-lock.yaml".to_string(),
        "hash_git_files.py".to_string(),
    ]
}
fn default_context_exact_paths() -> Vec<String> {
    vec![".pre-commit-config.yaml".to_string()]
}

/// Release tagging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseConfig {
    /// Git remote queried and pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Prefix prepended to the version to form the tag name
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Manifest the version is read from
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
            manifest: default_manifest(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}
fn default_tag_prefix() -> String {
    "v".to_string()
}
fn default_manifest() -> String {
    "pyproject.toml".to_string()
}

/// CI tooling and dependency sync configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolingConfig {
    /// Environment list, relative to the repository root
    #[serde(default = "default_envs_file")]
    pub envs_file: String,

    /// uv install script URL; `{version}` is replaced with the pinned uv version
    #[serde(default = "default_uv_install_url")]
    pub uv_install_url: String,
}

impl Default for ToolingConfig {
    fn default() -> Self {
        Self {
            envs_file: default_envs_file(),
            uv_install_url: default_uv_install_url(),
        }
    }
}

fn default_envs_file() -> String {
    ".devcontainer/envs.json".to_string()
}
fn default_uv_install_url() -> String {
    "https://astral.sh/uv/{version}/install.sh".to_string()
}
