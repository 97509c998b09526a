//! Bounded 0–100 string similarity.
//!
//! The score is the better of a whole-string ratio and a token-sort ratio,
//! so word order ("Zelda Link's Awakening" vs "Link's Awakening Zelda")
//! costs nothing while genuinely different titles stay far apart.

/// Similarity between two strings in `0.0..=100.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    ratio(a, b).max(token_sort_ratio(a, b))
}

/// Sequence ratio: `200 * lcs(a, b) / (len(a) + len(b))`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let matched = lcs_length(&a_chars, &b_chars);
    200.0 * matched as f64 / (a_chars.len() + b_chars.len()) as f64
}

/// Ratio of the two strings with their whitespace tokens sorted.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Longest common subsequence length, single-row DP.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut prev_diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag + 1
            } else {
                above.max(row[j])
            };
            prev_diag = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(similarity("chrono trigger", "chrono trigger"), 100.0);
    }

    #[test]
    fn disjoint_strings_score_0() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn score_is_symmetric() {
        let forward = similarity("final fantasy vii", "final fantasy");
        let backward = similarity("final fantasy", "final fantasy vii");
        assert_eq!(forward, backward);
    }

    #[test]
    fn score_is_bounded() {
        let cases = [
            ("chrono trigger", "chrono cross"),
            ("a", "aaaa"),
            ("", "something"),
        ];
        for (a, b) in cases {
            let s = similarity(a, b);
            assert!((0.0..=100.0).contains(&s), "{a:?} vs {b:?} scored {s}");
        }
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(similarity("mario super world", "super mario world"), 100.0);
    }

    #[test]
    fn half_overlap_scores_exactly_50() {
        // lcs("ab", "ax") = 1, 200 * 1 / 4 = 50
        assert_eq!(ratio("ab", "ax"), 50.0);
    }

    #[test]
    fn near_titles_beat_far_titles() {
        let near = similarity("chrono trigger", "chrono trigger ii");
        let far = similarity("chrono trigger", "street fighter alpha");
        assert!(near > far);
    }
}
