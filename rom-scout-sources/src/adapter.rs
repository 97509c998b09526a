use async_trait::async_trait;

/// One resolved download (or play) link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Human-readable source name, e.g. "Myrient".
    pub source_label: &'static str,
    pub url: String,
    /// Set when the link is one disc of a multi-disc release.
    pub disc_number: Option<u32>,
}

/// Uniform contract over heterogeneous catalogs.
///
/// `resolve` never fails: missing platform mappings, empty indexes,
/// network errors, and unqualified candidates all degrade to an empty
/// vec, with the reason logged. The aggregator relies on this to treat
/// indexed and live-search adapters identically.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The label stamped on every link this adapter produces.
    fn label(&self) -> &'static str;

    /// Resolve a game title and platform name to ranked download links.
    async fn resolve(&self, game_title: &str, platform_name: &str) -> Vec<DownloadLink>;
}

/// Append exactly one trailing separator to an endpoint prefix.
pub(crate) fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    format!("{trimmed}/")
}

/// Collapse an adapter-internal result to the never-fails contract.
///
/// Expected outcomes (no mapping, nothing qualified) log at debug;
/// anything else is worth a warning.
pub(crate) fn absorb(
    label: &str,
    result: Result<Vec<DownloadLink>, crate::SourceError>,
) -> Vec<DownloadLink> {
    use crate::SourceError::*;
    match result {
        Ok(links) => links,
        Err(e @ (NoPlatformMapping(_) | NoQualifyingCandidate(_))) => {
            log::debug!("[{label}] {e}");
            Vec::new()
        }
        Err(e) => {
            log::warn!("[{label}] {e}");
            Vec::new()
        }
    }
}
