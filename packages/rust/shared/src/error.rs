//! Error types for the OWNERS tooling.
//!
//! Library crates use [`OwnersError`] via `thiserror`.
//! App crates (audit/gen) wrap this with `color-eyre` at the process boundary.

use std::path::PathBuf;

/// Top-level error type for all OWNERS tooling operations.
///
/// Every variant is fatal for the run that produced it. Per-item failures
/// (one collaborator add, one maintainer lookup) are carried as report values
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum OwnersError {
    /// The platform credential is missing or empty.
    #[error("credential error: {message}")]
    Credential { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory walk failed (permission, broken entry, loop).
    #[error("error walking the directory tree: {0}")]
    Walk(String),

    /// A marker file could not be parsed.
    #[error("parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Transport failure or non-success status from the collaboration platform.
    #[error("remote error: {0}")]
    Remote(String),

    /// Chart metadata could not be loaded.
    #[error("load error: {message}")]
    Load { message: String },

    /// Serializing a document failed.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OwnersError>;

impl OwnersError {
    /// Create a credential error from any displayable message.
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error for the document at `path`.
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a load error from any displayable message.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
