//! Flat catalog index: one relative path per line.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

/// One leaf file discovered in a source's directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Relative path from the source root, e.g.
    /// `Redump/Sony - PlayStation/Final Fantasy VII (USA) (Disc 1).zip`.
    pub path: String,
}

impl CatalogEntry {
    /// The final path segment.
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// An in-memory catalog for one source, loaded from a flat index file.
///
/// Immutable after load. Entry order is the crawl's append order, which
/// is arbitrary but stable for a given crawl run.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    source_id: String,
    entries: Vec<CatalogEntry>,
    loaded_at: DateTime<Local>,
}

impl CatalogIndex {
    /// Load an index from disk.
    ///
    /// A missing or empty backing file yields an empty index with a
    /// warning — callers treat that the same as "no results". Trailing
    /// blank lines are tolerated.
    pub fn load(path: &Path, source_id: &str) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| CatalogEntry {
                    path: line.trim_end().to_string(),
                })
                .collect(),
            Err(e) => {
                log::warn!(
                    "[{source_id}] index file {} not readable ({e}); treating as empty",
                    path.display()
                );
                Vec::new()
            }
        };
        if entries.is_empty() {
            log::warn!("[{source_id}] index is empty; run the index crawler to populate it");
        }
        Self {
            source_id: source_id.to_string(),
            entries,
            loaded_at: Local::now(),
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}
