//! Title normalization, disc-tag extraction, and candidate
//! disqualification.
//!
//! Catalog filenames follow (loosely) the No-Intro/Redump convention:
//! `Game Name (Region) (Rev A) (Disc 2).ext`. Matching compares derived
//! values only; the original filename is never mutated.

/// Normalize a title for comparison.
///
/// Lowercases, removes every parenthetical group, replaces underscores
/// with spaces, and collapses runs of whitespace. Idempotent.
pub fn normalize_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                let ch = if ch == '_' { ' ' } else { ch };
                for lower in ch.to_lowercase() {
                    out.push(lower);
                }
            }
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a trailing file extension (1–4 alphanumeric characters after the
/// final dot). Leaves names without a plausible extension untouched, so
/// titles like "F.E.A.R" survive only if their last segment is longer —
/// catalog entries always carry a real extension, which is the case that
/// matters here.
pub fn strip_extension(filename: &str) -> &str {
    if let Some(pos) = filename.rfind('.') {
        let ext = &filename[pos + 1..];
        if (1..=4).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return &filename[..pos];
        }
    }
    filename
}

/// Markers that make a candidate ineligible regardless of score:
/// revisions, pre-release builds, and alternate-distribution dumps.
const DISQUALIFIERS: &[&str] = &[
    "(rev",
    "(beta",
    "(proto",
    "(demo",
    "(sample",
    "(kiosk",
    "(unl",
    "(pirate",
    "(promo",
    "(debug",
    "(aftermarket",
    "(virtual console",
    "(switch online",
    "[b]",
];

/// Whether a filename carries a blacklisted marker.
///
/// A marker only counts when the tag word ends there ("(Rev 1)",
/// "(Unl)"), so annotations that merely start with the same letters
/// ("(Revenge ...)", "(Unlimited ...)") stay eligible.
pub fn is_disqualified(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    DISQUALIFIERS.iter().any(|marker| {
        let mut from = 0;
        while let Some(rel) = lower[from..].find(marker) {
            let end = from + rel + marker.len();
            from = end;
            let continues = lower[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic());
            if !continues {
                return true;
            }
        }
        false
    })
}

const DISC_KEYWORDS: &[&str] = &["disc", "disk", "cd"];

/// Detect a disc marker ("Disc 2", "Disk 1 of 3", "CD 2", case-insensitive)
/// in a filename.
///
/// Returns the disc number and a copy of the name with the marker span
/// removed. Names without a marker come back unchanged with `None`.
pub fn extract_disc(name: &str) -> (Option<u32>, String) {
    // ASCII lowercasing keeps byte offsets valid for slicing `name`.
    let lower = name.to_ascii_lowercase();
    for keyword in DISC_KEYWORDS {
        let mut search_from = 0;
        while let Some(rel) = lower[search_from..].find(keyword) {
            let start = search_from + rel;
            search_from = start + keyword.len();
            if !is_word_boundary(&lower, start, keyword.len()) {
                continue;
            }
            if let Some((number, end)) = parse_disc_number(&lower, start + keyword.len()) {
                let mut stripped = String::with_capacity(name.len());
                stripped.push_str(name[..start].trim_end());
                stripped.push(' ');
                stripped.push_str(name[end..].trim_start());
                return (Some(number), stripped.trim().to_string());
            }
        }
    }
    (None, name.to_string())
}

/// A keyword match only counts when it stands alone (so "cd" does not
/// match inside "arcade").
fn is_word_boundary(lower: &str, start: usize, len: usize) -> bool {
    let before_ok = start == 0
        || !lower[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
    let after_ok = !lower[start + len..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric());
    before_ok && after_ok
}

/// Parse `" 2"` or `" 1 of 3"` starting at `from`. Returns the disc
/// number and the byte offset just past the consumed span.
fn parse_disc_number(lower: &str, from: usize) -> Option<(u32, usize)> {
    let rest = &lower[from..];
    let after_space = rest.trim_start_matches([' ', '.', '#']);
    let skipped = rest.len() - after_space.len();
    if skipped == 0 {
        return None;
    }
    let digits_len = after_space
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_space.len());
    if digits_len == 0 {
        return None;
    }
    let number: u32 = after_space[..digits_len].parse().ok()?;
    let mut end = from + skipped + digits_len;

    // Optional "of N" suffix.
    let tail = &lower[end..];
    let trimmed = tail.trim_start();
    if let Some(after_of) = trimmed.strip_prefix("of ") {
        let total_len = after_of
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_of.len());
        if total_len > 0 {
            end += (tail.len() - trimmed.len()) + 3 + total_len;
        }
    }
    Some((number, end))
}

#[cfg(test)]
#[path = "tests/title_tests.rs"]
mod tests;
