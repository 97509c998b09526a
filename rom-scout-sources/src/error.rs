use thiserror::Error;

/// Internal failure taxonomy for source adapters.
///
/// None of these escape [`crate::SourceAdapter::resolve`]: every variant
/// is absorbed at the adapter boundary into an empty result plus a log
/// line. The variants exist so helpers can report *why* a lookup ended
/// early and the adapter can log it accurately.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no catalog coverage for this platform. Expected
    /// and common; logged at debug level only.
    #[error("no platform mapping for '{0}'")]
    NoPlatformMapping(String),

    /// The backing index is missing or empty.
    #[error("index for '{0}' is empty")]
    EmptyIndex(String),

    /// Network or HTTP failure during a live search.
    #[error("request failed: {0}")]
    RemoteTransient(#[from] reqwest::Error),

    /// The search endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    RemoteStatus { status: u16, url: String },

    /// All candidates were disqualified or scored below threshold.
    #[error("no qualifying candidate for '{0}'")]
    NoQualifyingCandidate(String),

    /// A winning entry could not be turned into a URL.
    #[error("could not build URL for '{0}'")]
    BadUrl(String),
}
