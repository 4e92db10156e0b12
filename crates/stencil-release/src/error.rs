//! Error types for stencil-release

use thiserror::Error;

/// Result type alias using stencil-release's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Release error types
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest file does not exist
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// Neither [project].version nor [tool.poetry].version is set
    #[error("No version field found in {path}")]
    MissingVersion { path: String },

    /// Manifest is not valid TOML
    #[error("Failed to parse {path}: {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Tag is already present on the remote
    #[error("Error: tag '{tag}' exists on remote '{remote}'")]
    TagExists { tag: String, remote: String },

    /// `git ls-remote` failed for a reason other than a missing ref
    #[error("Failed to query remote '{remote}': {message}")]
    RemoteQuery { remote: String, message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Create a manifest not found error
    pub fn manifest_not_found(path: impl Into<String>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create a missing version error
    pub fn missing_version(path: impl Into<String>) -> Self {
        Self::MissingVersion { path: path.into() }
    }

    /// Create a TOML parse error
    pub fn toml_parse(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlParse {
            path: path.into(),
            source,
        }
    }

    /// Create a tag exists error
    pub fn tag_exists(tag: impl Into<String>, remote: impl Into<String>) -> Self {
        Self::TagExists {
            tag: tag.into(),
            remote: remote.into(),
        }
    }

    /// Create a remote query error
    pub fn remote_query(remote: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteQuery {
            remote: remote.into(),
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }
}
