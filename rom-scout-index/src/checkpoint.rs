//! Crawl checkpoint: the pending directory stack persisted between runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;

/// Traversal state saved after each directory is fully processed.
///
/// Replaying the pending stack against the partial index file
/// reconstructs a crawl equivalent to an uninterrupted one: every entry
/// already written came from a directory no longer on the stack, so
/// nothing is double-counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlCheckpoint {
    /// Directories not yet fetched, relative to the crawl root.
    pub pending_dirs: Vec<String>,
    /// Files appended to the index so far (informational).
    pub entries_written: u64,
}

impl CrawlCheckpoint {
    /// Persist to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load a checkpoint if one exists.
    ///
    /// `Ok(None)` means no checkpoint (nothing to resume). A file that
    /// exists but does not parse is a corrupt checkpoint — the caller
    /// must not guess at traversal state.
    pub fn load(path: &Path) -> Result<Option<Self>, IndexError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let checkpoint =
            serde_json::from_str(&contents).map_err(|e| IndexError::CorruptCheckpoint {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Some(checkpoint))
    }

    /// Remove the checkpoint file. Missing files are fine.
    pub fn clear(path: &Path) -> Result<(), IndexError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
