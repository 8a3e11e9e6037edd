//! Error types for the build-unit model.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type BuildResult<T> = Result<T, BuildError>;

/// Error raised while configuring or building a target.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("refusing to execute an empty command")]
    EmptyCommand,

    #[error("index {index} out of range for list of length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("cannot link `{target}` against executable `{dependency}`")]
    InvalidLink { target: String, dependency: String },

    #[error("unknown target: {name}")]
    UnknownTarget { name: String },

    #[error("target `{name}` is already registered")]
    DuplicateTarget { name: String },

    #[error("source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {}", describe_code(*code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid glob pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{message}")]
    InvalidArguments { message: String },
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}
