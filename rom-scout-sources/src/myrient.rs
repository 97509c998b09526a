//! Indexed mirror adapter: resolves against the locally crawled Myrient
//! file index instead of hitting the mirror per query.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Url;

use rom_scout_core::{select_matches, PlatformTables, SourceId};
use rom_scout_index::CatalogIndex;

use crate::adapter::{absorb, normalize_base_url, DownloadLink, SourceAdapter};
use crate::error::SourceError;

const LABEL: &str = "Myrient";
const THRESHOLD: f64 = 70.0;

/// Adapter over the flat crawled index of the Myrient mirror.
///
/// Owns its [`CatalogIndex`] exclusively; the index is loaded from disk
/// on first use and cached for the life of the adapter.
pub struct MyrientSource {
    tables: PlatformTables,
    base_url: String,
    index_path: PathBuf,
    index: OnceLock<CatalogIndex>,
}

impl MyrientSource {
    pub fn new(tables: PlatformTables, base_url: &str, index_path: impl Into<PathBuf>) -> Self {
        Self {
            tables,
            base_url: normalize_base_url(base_url),
            index_path: index_path.into(),
            index: OnceLock::new(),
        }
    }

    fn index(&self) -> &CatalogIndex {
        self.index
            .get_or_init(|| CatalogIndex::load(&self.index_path, "myrient"))
    }

    fn lookup(&self, game_title: &str, platform_name: &str) -> Result<Vec<DownloadLink>, SourceError> {
        let canonical = self.tables.canonicalize(platform_name);
        let subpath = self
            .tables
            .subpath_for(SourceId::Myrient, &canonical)
            .ok_or_else(|| SourceError::NoPlatformMapping(canonical.clone()))?;

        let index = self.index();
        if index.is_empty() {
            return Err(SourceError::EmptyIndex(LABEL.to_string()));
        }

        let prefix = format!("{subpath}/");
        let in_platform: Vec<_> = index
            .entries()
            .iter()
            .filter(|entry| entry.path.starts_with(&prefix))
            .collect();
        let filenames: Vec<&str> = in_platform.iter().map(|e| e.filename()).collect();

        let matches = select_matches(game_title, &filenames, THRESHOLD);
        if matches.is_empty() {
            return Err(SourceError::NoQualifyingCandidate(game_title.to_string()));
        }

        let base = Url::parse(&self.base_url)
            .map_err(|_| SourceError::BadUrl(self.base_url.clone()))?;
        let mut links = Vec::with_capacity(matches.len());
        for m in matches {
            let entry = in_platform[m.index];
            // Url::join percent-encodes the spaces and parens common in
            // No-Intro names.
            let url = base
                .join(&entry.path)
                .map_err(|_| SourceError::BadUrl(entry.path.clone()))?;
            log::debug!(
                "[{LABEL}] matched '{}' (score {:.0}) for '{game_title}'",
                entry.filename(),
                m.score
            );
            links.push(DownloadLink {
                source_label: LABEL,
                url: url.to_string(),
                disc_number: m.disc_number,
            });
        }
        Ok(links)
    }
}

#[async_trait]
impl SourceAdapter for MyrientSource {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn resolve(&self, game_title: &str, platform_name: &str) -> Vec<DownloadLink> {
        absorb(LABEL, self.lookup(game_title, platform_name))
    }
}

#[cfg(test)]
#[path = "tests/myrient_tests.rs"]
mod tests;
