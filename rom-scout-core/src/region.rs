use serde::{Deserialize, Serialize};

/// Release regions recognized in No-Intro/Redump filename tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Usa,
    World,
    Europe,
    Japan,
    Australia,
    Korea,
    China,
    Taiwan,
    Brazil,
}

/// Preference order for tie-breaking between otherwise-equal matches.
/// Earlier is better.
pub const REGION_PRIORITY: &[Region] = &[
    Region::Usa,
    Region::World,
    Region::Europe,
    Region::Japan,
    Region::Australia,
    Region::Korea,
    Region::China,
    Region::Taiwan,
    Region::Brazil,
];

impl Region {
    /// The tag string as it appears in filenames (e.g., "(USA)").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::World => "World",
            Self::Europe => "Europe",
            Self::Japan => "Japan",
            Self::Australia => "Australia",
            Self::Korea => "Korea",
            Self::China => "China",
            Self::Taiwan => "Taiwan",
            Self::Brazil => "Brazil",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Rank a filename by region preference. Lower is better.
///
/// Scans the filename's parenthetical tags for region names in priority
/// order; a multi-region tag like "(USA, Europe)" ranks by its best
/// member. Filenames with no recognized region tag get the lowest
/// preference (`REGION_PRIORITY.len()`).
pub fn region_rank(filename: &str) -> usize {
    let tags = paren_groups(filename);
    for (rank, region) in REGION_PRIORITY.iter().enumerate() {
        for group in &tags {
            if group
                .split(',')
                .any(|part| part.trim().eq_ignore_ascii_case(region.tag()))
            {
                return rank;
            }
        }
    }
    REGION_PRIORITY.len()
}

/// Collect the contents of every top-level `(...)` group in a string.
fn paren_groups(s: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ')' => {
                if depth == 1 {
                    groups.push(&s[start..i]);
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usa_ranks_before_japan() {
        let usa = region_rank("Chrono Trigger (USA).sfc");
        let japan = region_rank("Chrono Trigger (Japan).sfc");
        assert!(usa < japan);
    }

    #[test]
    fn multi_region_tag_uses_best_member() {
        assert_eq!(
            region_rank("Some Game (Japan, USA).bin"),
            region_rank("Some Game (USA).bin")
        );
    }

    #[test]
    fn untagged_ranks_last() {
        let untagged = region_rank("Some Game.bin");
        for region in REGION_PRIORITY {
            let tagged = region_rank(&format!("Some Game ({}).bin", region.tag()));
            assert!(tagged < untagged, "{region} should outrank untagged");
        }
    }

    #[test]
    fn region_words_in_title_are_ignored() {
        // "Japan" as part of the title, not a tag
        assert_eq!(region_rank("Japan Pro Wrestling.bin"), REGION_PRIORITY.len());
    }

    #[test]
    fn case_insensitive_tags() {
        assert_eq!(region_rank("Foo (usa).bin"), 0);
    }
}
