use std::path::PathBuf;

use thiserror::Error;

/// Errors from index loading and crawling.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The checkpoint file exists but cannot be understood. This is the
    /// one condition allowed to abort a resume; the index file itself
    /// remains valid up to its last flush.
    #[error("corrupt crawl checkpoint at {path}: {message}")]
    CorruptCheckpoint { path: PathBuf, message: String },

    #[error("invalid base URL '{0}'")]
    BadBaseUrl(String),
}
