use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Errors that can occur while resolving, staging, building or running a script
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No script found, tried: {}", display_candidates(.candidates))]
    NotFound { candidates: Vec<PathBuf> },

    #[error("Build error (exit status {exit_code}):\n\n{message}")]
    Compile { exit_code: i32, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("IO error on '{}': {source}", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to spawn '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Tag describing which class of failure an [`Error`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Resolution,
    Compile,
    Io,
    Execution,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound { .. } => ErrorKind::Resolution,
            Error::Compile { .. } => ErrorKind::Compile,
            Error::IoError(_) | Error::FileError { .. } | Error::SpawnError { .. } => ErrorKind::Io,
            Error::Execution(_) => ErrorKind::Execution,
            Error::ConfigError(_) | Error::SerializationError(_) => ErrorKind::Config,
        }
    }

    /// Exit status carried by the error: the compiler's status for build
    /// failures, 0 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Compile { exit_code, .. } => *exit_code,
            _ => 0,
        }
    }

    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileError {
            path: path.into(),
            source,
        }
    }
}

fn display_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|c| c.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for scriptify operations
pub type Result<T> = std::result::Result<T, Error>;
