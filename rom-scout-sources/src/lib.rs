//! Catalog source adapters and the aggregator.
//!
//! Every catalog — indexed mirror or live search page — is wrapped in a
//! [`SourceAdapter`] with the same contract: resolve a (title, platform)
//! pair to zero or more download links, never raising to the caller.
//! The [`Aggregator`] picks the adapters relevant to a platform class
//! and concatenates their results in fixed priority order.

pub mod adapter;
pub mod aggregator;
pub mod emulatorjs;
pub mod error;
pub mod goggames;
pub mod myrient;
pub mod romspure;

pub use adapter::{DownloadLink, SourceAdapter};
pub use aggregator::Aggregator;
pub use emulatorjs::EmulatorJsSource;
pub use error::SourceError;
pub use goggames::GogGamesSource;
pub use myrient::MyrientSource;
pub use romspure::RomsPureSource;
