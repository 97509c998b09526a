//! Core matching engine for rom-scout: platform name canonicalization,
//! region preference ranking, title normalization, disc-tag parsing, and
//! the fuzzy title matcher.
//!
//! Everything in this crate is pure computation — no I/O, no async. The
//! index and source crates feed it filenames and titles and get back
//! ranked match selections.

pub mod matcher;
pub mod platform;
pub mod region;
pub mod similarity;
pub mod title;

pub use matcher::{select_matches, MatchCandidate};
pub use platform::{PlatformTables, SourceId};
pub use region::{region_rank, Region};
pub use title::{extract_disc, is_disqualified, normalize_title, strip_extension};
