//! Devcontainer context filter
//!
//! A pure predicate over tracked path strings. Rules are unioned:
//! - anything under the reserved config directory, except the designated config
//!   file itself, which is pulled out separately;
//! - anything ending in one of the context suffixes (lock files, the hook script);
//! - anything exactly matching one of the context paths (pre-commit config).

use crate::error::{Error, Result};
use stencil_core::HashConfig;
use tracing::debug;

/// How the filter classifies a single tracked path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// The config file that carries the hash line
    ConfigFile,
    /// Part of the checksum input
    Context,
    /// Irrelevant to the devcontainer build
    Excluded,
}

/// Result of filtering a tracked file set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSelection {
    /// Paths fed to the checksum, in input order
    pub selected: Vec<String>,
    /// Repository-relative path of the config file to annotate
    pub config_path: String,
}

/// Selects the devcontainer context subset of the tracked files
#[derive(Debug, Clone)]
pub struct ContextFilter {
    config_dir: String,
    config_filename: String,
    suffixes: Vec<String>,
    exact_paths: Vec<String>,
}

impl ContextFilter {
    pub fn new(config: &HashConfig) -> Self {
        Self {
            config_dir: config.config_dir.clone(),
            config_filename: config.config_filename.clone(),
            suffixes: config.context_suffixes.clone(),
            exact_paths: config.context_exact_paths.clone(),
        }
    }

    /// Designated config filename this filter looks for
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    pub fn classify(&self, path: &str) -> PathRole {
        if path.starts_with(&self.config_dir) {
            if path.ends_with(&self.config_filename) {
                return PathRole::ConfigFile;
            }
            return PathRole::Context;
        }

        let suffix_match = self.suffixes.iter().any(|s| path.ends_with(s.as_str()));
        let exact_match = self.exact_paths.iter().any(|p| p == path);
        if suffix_match || exact_match {
            PathRole::Context
        } else {
            PathRole::Excluded
        }
    }

    /// Split tracked paths into the checksum subset and the config file
    ///
    /// Exactly one path may match the config-file rule.
    pub fn select<S: AsRef<str>>(&self, paths: &[S]) -> Result<ContextSelection> {
        let mut selected = Vec::new();
        let mut config_matches = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match self.classify(path) {
                PathRole::ConfigFile => config_matches.push(path.to_string()),
                PathRole::Context => selected.push(path.to_string()),
                PathRole::Excluded => {}
            }
        }

        let config_path = match config_matches.len() {
            0 => return Err(Error::missing_config_file(&self.config_filename)),
            1 => config_matches.remove(0),
            _ => {
                return Err(Error::ambiguous_config_file(
                    &self.config_filename,
                    &config_matches,
                ))
            }
        };

        debug!(
            "Selected {} of {} tracked files; config file is {}",
            selected.len(),
            paths.len(),
            config_path
        );

        Ok(ContextSelection {
            selected,
            config_path,
        })
    }
}

impl Default for ContextFilter {
    fn default() -> Self {
        Self::new(&HashConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_rules() {
        let filter = ContextFilter::default();

        assert_eq!(
            filter.classify(".devcontainer/devcontainer.json"),
            PathRole::ConfigFile
        );
        assert_eq!(filter.classify(".devcontainer/Dockerfile"), PathRole::Context);
        assert_eq!(
            filter.classify(".devcontainer/install-ci-tooling.py"),
            PathRole::Context
        );
        assert_eq!(filter.classify("uv.lock"), PathRole::Context);
        assert_eq!(filter.classify("frontend/pnpm-lock.yaml"), PathRole::Context);
        assert_eq!(
            filter.classify(".github/workflows/hash_git_files.py"),
            PathRole::Context
        );
        assert_eq!(filter.classify(".pre-commit-config.yaml"), PathRole::Context);
        assert_eq!(filter.classify("README.md"), PathRole::Excluded);
        assert_eq!(filter.classify("src/main.py"), PathRole::Excluded);
    }

    #[test]
    fn test_exact_path_rule_is_not_a_suffix_rule() {
        let filter = ContextFilter::default();
        assert_eq!(
            filter.classify("template/.pre-commit-config.yaml"),
            PathRole::Excluded
        );
    }

    #[test]
    fn test_config_filename_outside_config_dir_is_excluded() {
        let filter = ContextFilter::default();
        assert_eq!(
            filter.classify("template/.devcontainer/devcontainer.json"),
            PathRole::Excluded
        );
    }

    #[test]
    fn test_select_splits_config_from_context() {
        let filter = ContextFilter::default();
        let paths = [
            "README.md",
            ".devcontainer/devcontainer.json",
            ".devcontainer/Dockerfile",
            "uv.lock",
            ".pre-commit-config.yaml",
        ];

        let selection = filter.select(&paths).unwrap();
        assert_eq!(selection.config_path, ".devcontainer/devcontainer.json");
        assert_eq!(
            selection.selected,
            vec![
                ".devcontainer/Dockerfile".to_string(),
                "uv.lock".to_string(),
                ".pre-commit-config.yaml".to_string()
            ]
        );
    }

    #[test]
    fn test_select_without_config_file_fails() {
        let filter = ContextFilter::default();
        let err = filter.select(&["uv.lock", "README.md"]).unwrap_err();
        assert!(matches!(err, Error::MissingConfigFile { .. }));
        assert_eq!(
            err.to_string(),
            "No devcontainer.json file found in the tracked files"
        );
    }

    #[test]
    fn test_select_with_two_config_files_fails() {
        let filter = ContextFilter::default();
        let err = filter
            .select(&[
                ".devcontainer/devcontainer.json",
                ".devcontainer/python/devcontainer.json",
            ])
            .unwrap_err();
        assert!(matches!(err, Error::AmbiguousConfigFile { .. }));
    }

    #[test]
    fn test_custom_rules_from_config() {
        let config = HashConfig {
            config_dir: ".config/".to_string(),
            config_filename: "env.jsonc".to_string(),
            context_suffixes: vec!["Cargo.lock".to_string()],
            context_exact_paths: vec!["rust-toolchain.toml".to_string()],
        };
        let filter = ContextFilter::new(&config);

        assert_eq!(filter.classify(".config/env.jsonc"), PathRole::ConfigFile);
        assert_eq!(filter.classify("Cargo.lock"), PathRole::Context);
        assert_eq!(filter.classify("rust-toolchain.toml"), PathRole::Context);
        assert_eq!(filter.classify("uv.lock"), PathRole::Excluded);
        assert_eq!(
            filter.classify(".devcontainer/devcontainer.json"),
            PathRole::Excluded
        );
    }
}
