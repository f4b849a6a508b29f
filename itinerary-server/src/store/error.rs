//! Storage error types.

use std::path::PathBuf;

/// Errors that can occur when reading from storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot file could not be read
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot contents could not be parsed
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend could not answer the query
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
