//! EmulatorJS adapter: resolves titles against a structured per-system
//! title index and builds "play now" links for a self-hosted instance.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;

use rom_scout_core::similarity::similarity;
use rom_scout_core::{normalize_title, PlatformTables, SourceId};
use rom_scout_index::TitleIndex;

use crate::adapter::{absorb, normalize_base_url, DownloadLink, SourceAdapter};
use crate::error::SourceError;

const LABEL: &str = "EmulatorJS";
const THRESHOLD: f64 = 70.0;

/// Adapter over a local EmulatorJS title index.
///
/// Requires an externally supplied base URL (the instance is
/// self-hosted); without one the adapter is inert and resolves to
/// nothing.
pub struct EmulatorJsSource {
    tables: PlatformTables,
    base_url: Option<String>,
    index_path: PathBuf,
    titles: OnceLock<TitleIndex>,
}

impl EmulatorJsSource {
    pub fn new(
        tables: PlatformTables,
        base_url: Option<&str>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tables,
            base_url: base_url.map(normalize_base_url),
            index_path: index_path.into(),
            titles: OnceLock::new(),
        }
    }

    fn titles(&self) -> &TitleIndex {
        self.titles.get_or_init(|| TitleIndex::load(&self.index_path))
    }

    fn lookup(&self, game_title: &str, platform_name: &str) -> Result<Vec<DownloadLink>, SourceError> {
        let Some(base) = &self.base_url else {
            log::debug!("[{LABEL}] no base URL configured; adapter disabled");
            return Ok(Vec::new());
        };

        let canonical = self.tables.canonicalize(platform_name);
        let code = self
            .tables
            .subpath_for(SourceId::EmulatorJs, &canonical)
            .ok_or_else(|| SourceError::NoPlatformMapping(canonical.clone()))?;

        let titles = self.titles().titles_for(code);
        if titles.is_empty() {
            return Err(SourceError::EmptyIndex(format!("{LABEL}/{code}")));
        }

        let query = normalize_title(game_title);
        let mut best: Option<(usize, f64)> = None;
        for (position, title) in titles.iter().enumerate() {
            let score = similarity(&normalize_title(title), &query);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }

        match best {
            Some((position, score)) if score >= THRESHOLD => {
                log::debug!(
                    "[{LABEL}] matched '{}' (score {score:.0}) for '{game_title}'",
                    titles[position]
                );
                // Play-URL fragments are 1-based; the index itself is
                // 0-based.
                Ok(vec![DownloadLink {
                    source_label: LABEL,
                    url: format!("{base}{code}---{}", position + 1),
                    disc_number: None,
                }])
            }
            _ => Err(SourceError::NoQualifyingCandidate(game_title.to_string())),
        }
    }
}

#[async_trait]
impl SourceAdapter for EmulatorJsSource {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn resolve(&self, game_title: &str, platform_name: &str) -> Vec<DownloadLink> {
        absorb(LABEL, self.lookup(game_title, platform_name))
    }
}

#[cfg(test)]
#[path = "tests/emulatorjs_tests.rs"]
mod tests;
