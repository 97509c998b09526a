//! Candidate filtering and winner selection.
//!
//! `select_matches` runs the full pipeline over a slice of candidate
//! filenames: normalization, disc extraction, disqualification, exact-match
//! shortcut, similarity scoring, region ranking, threshold filtering, and
//! disc-set expansion. Callers index the returned candidates back into
//! their own entry list via `MatchCandidate::index`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::region::region_rank;
use crate::similarity::similarity;
use crate::title::{extract_disc, is_disqualified, normalize_title, strip_extension};

/// A surviving candidate with its derived comparison values.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    /// Position in the input slice.
    pub index: usize,
    /// Normalized base title (disc marker and annotations removed).
    pub base_title: String,
    /// Disc number if the filename carried a disc marker.
    pub disc_number: Option<u32>,
    /// Region preference rank; lower is better.
    pub region_rank: usize,
    /// Similarity score in 0–100. Exact base-title matches are pinned
    /// to 100 and additionally flagged in `exact`.
    pub score: f64,
    /// Whether the base title equals the normalized query exactly.
    pub exact: bool,
}

/// Select the winning candidate(s) for a query.
///
/// Returns an empty vec when nothing qualifies, a single candidate for a
/// single-file release, or one candidate per disc (ascending disc number)
/// when the winner belongs to a multi-disc set.
pub fn select_matches(query: &str, candidates: &[&str], threshold: f64) -> Vec<MatchCandidate> {
    let nquery = normalize_title(query);
    if nquery.is_empty() {
        return Vec::new();
    }

    let mut survivors: Vec<MatchCandidate> = Vec::new();
    for (index, filename) in candidates.iter().enumerate() {
        if is_disqualified(filename) {
            continue;
        }
        let (disc_number, stripped) = extract_disc(filename);
        let base_title = normalize_title(strip_extension(&stripped));
        if base_title.is_empty() {
            continue;
        }
        let exact = base_title == nquery;
        let score = if exact {
            100.0
        } else {
            similarity(&base_title, &nquery)
        };
        // A score exactly at the threshold qualifies.
        if !exact && score < threshold {
            continue;
        }
        survivors.push(MatchCandidate {
            index,
            base_title,
            disc_number,
            region_rank: region_rank(filename),
            score,
            exact,
        });
    }

    let Some(winner) = survivors.iter().min_by(|a, b| rank(a, b)).cloned() else {
        return Vec::new();
    };

    match winner.disc_number {
        None => vec![winner],
        Some(_) => expand_disc_set(&winner, survivors),
    }
}

/// Ordering for winner selection: exact match first, then score, then
/// region preference, then input position for determinism.
fn rank(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.exact
        .cmp(&a.exact)
        .then(b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
        .then(a.region_rank.cmp(&b.region_rank))
        .then(a.index.cmp(&b.index))
}

/// Collect the best candidate per disc number among survivors sharing the
/// winner's exact base title.
fn expand_disc_set(winner: &MatchCandidate, survivors: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    let mut by_disc: BTreeMap<u32, MatchCandidate> = BTreeMap::new();
    for candidate in survivors {
        let Some(disc) = candidate.disc_number else {
            continue;
        };
        if candidate.base_title != winner.base_title {
            continue;
        }
        match by_disc.get(&disc) {
            Some(existing) if rank(existing, &candidate) != Ordering::Greater => {}
            _ => {
                by_disc.insert(disc, candidate);
            }
        }
    }
    by_disc.into_values().collect()
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
