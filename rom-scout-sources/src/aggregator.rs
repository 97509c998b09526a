//! Fans a resolution request out to the adapters relevant for the
//! platform and concatenates their links in fixed priority order.

use futures::future::join_all;

use rom_scout_core::PlatformTables;

use crate::adapter::{DownloadLink, SourceAdapter};

/// Routes a (title, platform) query to the right set of adapters.
///
/// Two platform classes exist: PC titles (canonical `PC` or `DOS`) go to
/// the PC adapters, everything else to the console adapters. Within a
/// class, adapters run concurrently but the returned links always appear
/// in the order the adapters were registered, never completion order.
pub struct Aggregator {
    tables: PlatformTables,
    console_sources: Vec<Box<dyn SourceAdapter>>,
    pc_sources: Vec<Box<dyn SourceAdapter>>,
}

impl Aggregator {
    pub fn new(
        tables: PlatformTables,
        console_sources: Vec<Box<dyn SourceAdapter>>,
        pc_sources: Vec<Box<dyn SourceAdapter>>,
    ) -> Self {
        Self {
            tables,
            console_sources,
            pc_sources,
        }
    }

    /// Resolve across every adapter in the platform's class.
    ///
    /// Adapter failures never propagate; an adapter that finds nothing
    /// (or errors internally) simply contributes no links.
    pub async fn resolve(&self, game_title: &str, platform_name: &str) -> Vec<DownloadLink> {
        let canonical = self.tables.canonicalize(platform_name);
        let sources = if is_pc_platform(&canonical) {
            &self.pc_sources
        } else {
            &self.console_sources
        };
        log::info!(
            "resolving '{game_title}' on '{canonical}' across {} source(s)",
            sources.len()
        );

        let lookups = sources
            .iter()
            .map(|source| source.resolve(game_title, &canonical));
        let links: Vec<DownloadLink> = join_all(lookups).await.into_iter().flatten().collect();

        log::info!("'{game_title}' on '{canonical}': {} link(s)", links.len());
        links
    }
}

fn is_pc_platform(canonical: &str) -> bool {
    canonical == "PC" || canonical == "DOS"
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
