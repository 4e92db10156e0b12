//! Error types for stencil-tooling

use thiserror::Error;

/// Result type alias using stencil-tooling's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Tooling error types
#[derive(Error, Debug)]
pub enum Error {
    /// `--skip-check-lock` and `--optionally-check-lock` given together
    #[error("Cannot skip and optionally check the lock file at the same time.")]
    ConflictingLockOptions,

    /// Environment list is missing
    #[error("Environment config not found: {path}")]
    EnvsConfigNotFound { path: String },

    /// Environment list is not valid JSON or names an unknown package manager
    #[error("Failed to parse {path}: {source}")]
    JsonParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// External command exited unsuccessfully
    #[error("Command `{command}` failed with {status}")]
    CommandFailed { command: String, status: String },

    /// External command could not be started
    #[error("Failed to start `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] stencil_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an envs config not found error
    pub fn envs_config_not_found(path: impl Into<String>) -> Self {
        Self::EnvsConfigNotFound { path: path.into() }
    }

    /// Create a JSON parse error
    pub fn json_parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, status: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            status: status.into(),
        }
    }

    /// Create a command spawn error
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }
}
