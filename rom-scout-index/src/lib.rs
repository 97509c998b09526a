//! Persisted catalog indexes and the resumable directory-tree crawler.
//!
//! A catalog source exposes thousands of files behind a slow remote
//! directory listing. This crate maintains local stand-ins: a flat
//! one-path-per-line index built by [`crawler::IndexCrawler`], and a
//! structured code→titles index for sources that publish title lists
//! directly. The crawler checkpoints its pending work after every
//! directory so an interrupted run resumes instead of restarting.

pub mod catalog;
pub mod checkpoint;
pub mod crawler;
pub mod error;
pub mod titles;

pub use catalog::{CatalogEntry, CatalogIndex};
pub use checkpoint::CrawlCheckpoint;
pub use crawler::{CrawlSummary, DirectoryLister, HttpLister, IndexCrawler, ListingEntry};
pub use error::IndexError;
pub use titles::TitleIndex;
