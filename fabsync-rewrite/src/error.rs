//! Error types for fabsync-rewrite.

use std::path::PathBuf;

use thiserror::Error;

use fabsync_core::ConfigError;

/// All errors that can arise while rewriting pipeline documents.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The lookup table could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The directory to scan does not exist or is not a directory.
    #[error("root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A discovered document is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`RewriteError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RewriteError {
    RewriteError::Io {
        path: path.into(),
        source,
    }
}
