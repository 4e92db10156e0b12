//! Error types for stencil-hash
//!
//! Every variant is fatal: the CLI prints the chain to stderr and exits 1.
//! Re-running after fixing the cause is always safe.

use thiserror::Error;

/// Result type alias using stencil-hash's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Context hash error types
#[derive(Error, Debug)]
pub enum Error {
    /// Repository folder does not exist or is not a directory
    #[error("{path} is not a valid directory")]
    InvalidDirectory { path: String },

    /// Tracked files could not be listed
    #[error("{path} does not appear to be a Git repository or Git is not installed: {message}")]
    RepositoryAccess { path: String, message: String },

    /// No tracked path matches the designated config filename
    #[error("No {filename} file found in the tracked files")]
    MissingConfigFile { filename: String },

    /// More than one tracked path matches the designated config filename
    #[error("Multiple {filename} files found in the tracked files: {matches}")]
    AmbiguousConfigFile { filename: String, matches: String },

    /// Config file has no line consisting of a lone closing brace
    #[error("No closing brace line found in {path}")]
    MalformedConfig { path: String },

    /// A context file could not be read while computing the checksum
    #[error("Error reading file {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be read or rewritten
    #[error("Error updating file {path}")]
    ConfigUpdate {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid directory error
    pub fn invalid_directory(path: impl Into<String>) -> Self {
        Self::InvalidDirectory { path: path.into() }
    }

    /// Create a repository access error
    pub fn repository_access(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RepositoryAccess {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing config file error
    pub fn missing_config_file(filename: impl Into<String>) -> Self {
        Self::MissingConfigFile {
            filename: filename.into(),
        }
    }

    /// Create an ambiguous config file error
    pub fn ambiguous_config_file(filename: impl Into<String>, matches: &[String]) -> Self {
        Self::AmbiguousConfigFile {
            filename: filename.into(),
            matches: matches.join(", "),
        }
    }

    /// Create a malformed config error
    pub fn malformed_config(path: impl Into<String>) -> Self {
        Self::MalformedConfig { path: path.into() }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a config update error
    pub fn config_update(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigUpdate {
            path: path.into(),
            source,
        }
    }
}
