//! Error types for fabsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a lookup table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Read or write failure on the table file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table file exists but is not a valid table.
    #[error("failed to parse linked service config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The table file does not exist.
    #[error("linked service config not found at {path}")]
    NotFound { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
