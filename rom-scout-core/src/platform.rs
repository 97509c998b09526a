//! Platform name canonicalization and per-source catalog mappings.
//!
//! Metadata lookups hand us free-form platform labels ("ps1", "PSX",
//! "PlayStation"). Each catalog source keys its tree by its own notion of
//! a platform (a Redump/No-Intro subpath, a URL slug, a short emulator
//! code). `PlatformTables` centralizes both steps: alias → canonical name,
//! canonical name → source-specific subpath or code.

/// Identifies a catalog source for subpath/code lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Myrient file mirror (flat crawled index).
    Myrient,
    /// RomsPure search pages (live search, URL slugs).
    RomsPure,
    /// Self-hosted EmulatorJS instance (structured title index).
    EmulatorJs,
}

/// Lowercase alias → canonical platform name.
///
/// Canonical names follow TheGamesDB platform naming since that is what
/// the metadata layer hands us.
const PLATFORM_SYNONYMS: &[(&str, &str)] = &[
    ("sony playstation", "Sony PlayStation"),
    ("playstation", "Sony PlayStation"),
    ("ps1", "Sony PlayStation"),
    ("psx", "Sony PlayStation"),
    ("sony playstation 2", "Sony PlayStation 2"),
    ("playstation 2", "Sony PlayStation 2"),
    ("ps2", "Sony PlayStation 2"),
    ("sony playstation 3", "Sony Playstation 3"),
    ("playstation 3", "Sony Playstation 3"),
    ("ps3", "Sony Playstation 3"),
    ("sony playstation 4", "Sony Playstation 4"),
    ("playstation 4", "Sony Playstation 4"),
    ("ps4", "Sony Playstation 4"),
    ("sony playstation vita", "Sony Playstation Vita"),
    ("playstation vita", "Sony Playstation Vita"),
    ("psvita", "Sony Playstation Vita"),
    ("sony psp", "Sony PSP"),
    ("psp", "Sony PSP"),
    ("3do", "3DO Interactive Multiplayer"),
    ("3do interactive multiplayer", "3DO Interactive Multiplayer"),
    ("nintendo gamecube", "Nintendo GameCube"),
    ("gamecube", "Nintendo GameCube"),
    ("game cube", "Nintendo GameCube"),
    ("nintendo 64", "Nintendo 64"),
    ("n64", "Nintendo 64"),
    ("nintendo n64", "Nintendo 64"),
    ("nes", "Nintendo Entertainment System"),
    ("famicom", "Nintendo Entertainment System"),
    ("snes", "Super Nintendo (SNES)"),
    ("super nintendo", "Super Nintendo (SNES)"),
    ("super famicom", "Super Nintendo (SNES)"),
    ("super nintendo entertainment system", "Super Nintendo (SNES)"),
    ("gb", "Nintendo Game Boy"),
    ("game boy", "Nintendo Game Boy"),
    ("gbc", "Nintendo Game Boy Color"),
    ("game boy color", "Nintendo Game Boy Color"),
    ("gba", "Nintendo Game Boy Advance"),
    ("game boy advance", "Nintendo Game Boy Advance"),
    ("nds", "Nintendo DS"),
    ("ds", "Nintendo DS"),
    ("3ds", "Nintendo 3DS"),
    ("wii", "Nintendo Wii"),
    ("wii u", "Nintendo Wii U"),
    ("genesis", "Sega Genesis"),
    ("mega drive", "Sega Genesis"),
    ("sega mega drive", "Sega Genesis"),
    ("dreamcast", "Sega Dreamcast"),
    ("saturn", "Sega Saturn"),
    ("game gear", "Sega Game Gear"),
    ("xbox", "Microsoft Xbox"),
    ("xbox 360", "Microsoft Xbox 360"),
    ("x360", "Microsoft Xbox 360"),
    ("dos", "DOS"),
    ("ms-dos", "DOS"),
    ("pc", "PC"),
    ("windows", "PC"),
];

/// Canonical platform name → Myrient directory subpath.
const MYRIENT_SUBPATHS: &[(&str, &str)] = &[
    ("Nintendo Game Boy", "No-Intro/Nintendo - Game Boy"),
    ("Nintendo Game Boy Color", "No-Intro/Nintendo - Game Boy Color"),
    ("Nintendo Game Boy Advance", "No-Intro/Nintendo - Game Boy Advance"),
    ("Nintendo DS", "No-Intro/Nintendo - Nintendo DS (Decrypted)"),
    ("Nintendo 64", "No-Intro/Nintendo - Nintendo 64"),
    (
        "Nintendo Entertainment System",
        "No-Intro/Nintendo - Nintendo Entertainment System (Headered)",
    ),
    (
        "Super Nintendo (SNES)",
        "No-Intro/Nintendo - Super Nintendo Entertainment System",
    ),
    ("Nintendo 3DS", "No-Intro/Nintendo - Nintendo 3DS (Decrypted)"),
    ("Nintendo GameCube", "Redump/Nintendo - GameCube"),
    ("Nintendo Wii", "Redump/Nintendo - Wii"),
    ("Nintendo Wii U", "Redump/Nintendo - Wii U"),
    ("Sony PlayStation", "Redump/Sony - PlayStation"),
    ("Sony PlayStation 2", "Redump/Sony - PlayStation 2"),
    ("Sony Playstation 3", "Redump/Sony - PlayStation 3"),
    ("Sony Playstation 4", "Redump/Sony - PlayStation 4"),
    ("Sony PSP", "Redump/Sony - PlayStation Portable"),
    ("Microsoft Xbox", "Redump/Microsoft - Xbox"),
    ("Microsoft Xbox 360", "Redump/Microsoft - Xbox 360"),
    (
        "3DO Interactive Multiplayer",
        "Redump/Panasonic - 3DO Interactive Multiplayer",
    ),
    ("Atari 2600", "No-Intro/Atari - Atari 2600"),
    ("Fujitsu FM Towns Marty", "Redump/Fujitsu - FM-Towns"),
    ("Sega Dreamcast", "Redump/Sega - Dreamcast"),
    ("Sega Game Gear", "No-Intro/Sega - Game Gear"),
    ("Sega Genesis", "No-Intro/Sega - Mega Drive - Genesis"),
    ("Sega Saturn", "Redump/Sega - Saturn"),
    (
        "Sony Playstation Vita",
        "No-Intro/Sony - PlayStation Vita (PSN) (Content)",
    ),
    ("PC", "Redump/IBM - PC compatible"),
    ("DOS", "Redump/IBM - PC compatible"),
];

/// Canonical platform name → RomsPure URL slug.
const ROMSPURE_SLUGS: &[(&str, &str)] = &[
    ("3DO Interactive Multiplayer", "3do-interactive-multiplayer"),
    ("Atari 2600", "atari-2600"),
    ("Fujitsu FM Towns Marty", "fujitsu-fm-towns-marty"),
    ("Nintendo Entertainment System", "nintendo-entertainment-system"),
    ("Nintendo 3DS", "3ds"),
    ("Nintendo 64", "nintendo-64"),
    ("Nintendo DS", "nintendo-ds"),
    ("Nintendo Game Boy", "nintendo-game-boy"),
    ("Nintendo Game Boy Advance", "nintendo-game-boy-advance"),
    ("Nintendo Game Boy Color", "nintendo-game-boy-color"),
    ("Nintendo GameCube", "nintendo-gamecube"),
    ("Nintendo Wii", "nintendo-wii"),
    ("Nintendo Wii U", "wii-u"),
    ("Sony PlayStation 2", "sony-playstation-2"),
    ("Sega Dreamcast", "sega-dreamcast"),
    ("Sega Game Gear", "sega-game-gear"),
    ("Sega Genesis", "sega-genesis"),
    ("Sega Saturn", "sega-saturn"),
    ("Super Nintendo (SNES)", "super-nintendo-entertainment-system"),
    ("SNK Neo Geo AES", "snk-neo-geo-aes"),
    ("Sony PlayStation", "sony-playstation"),
    ("Sony Playstation 3", "sony-playstation-3"),
    ("Sony Playstation 4", "sony-playstation-4"),
    ("Sony Playstation Vita", "sony-playstation-vita"),
    ("Sony PSP", "sony-psp"),
    ("Microsoft Xbox", "microsoft-xbox"),
    ("Microsoft Xbox 360", "microsoft-xbox-360"),
];

/// Canonical platform name → EmulatorJS system short code.
const EMULATORJS_CODES: &[(&str, &str)] = &[
    ("Nintendo Game Boy", "gb"),
    ("Nintendo Game Boy Color", "gbc"),
    ("Nintendo Game Boy Advance", "gba"),
    ("Nintendo Entertainment System", "nes"),
    ("Super Nintendo (SNES)", "snes"),
    ("Nintendo 64", "n64"),
    ("Sega Genesis", "segaMD"),
    ("Sony PlayStation", "psx"),
    ("3DO Interactive Multiplayer", "3do"),
];

/// Immutable lookup tables shared by every adapter.
///
/// Constructed once at startup and passed by reference; the built-in
/// tables are static data, so construction is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformTables {
    _priv: (),
}

impl PlatformTables {
    pub fn builtin() -> Self {
        Self { _priv: () }
    }

    /// Resolve a raw platform label to its canonical name.
    ///
    /// Case-insensitive against the synonym table. Unknown labels pass
    /// through unchanged — they are valid platforms we simply have no
    /// aliases for, and will fail the subpath lookup later instead.
    /// Idempotent: canonical names map to themselves.
    pub fn canonicalize(&self, raw: &str) -> String {
        let lower = raw.trim().to_lowercase();
        for (alias, canonical) in PLATFORM_SYNONYMS {
            if *alias == lower {
                return (*canonical).to_string();
            }
        }
        // Already-canonical names arrive with their original casing.
        for (_, canonical) in PLATFORM_SYNONYMS {
            if canonical.to_lowercase() == lower {
                return (*canonical).to_string();
            }
        }
        raw.trim().to_string()
    }

    /// Look up the source-specific subpath/slug/code for a canonical name.
    ///
    /// `None` means the source has no catalog coverage for this platform.
    /// That is a normal outcome, not an error.
    pub fn subpath_for(&self, source: SourceId, canonical: &str) -> Option<&'static str> {
        let table = match source {
            SourceId::Myrient => MYRIENT_SUBPATHS,
            SourceId::RomsPure => ROMSPURE_SLUGS,
            SourceId::EmulatorJs => EMULATORJS_CODES,
        };
        table
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, subpath)| *subpath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        let tables = PlatformTables::builtin();
        for raw in ["ps1", "PSX", "PlayStation", "Sony PlayStation"] {
            assert_eq!(tables.canonicalize(raw), "Sony PlayStation", "for {raw}");
        }
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let tables = PlatformTables::builtin();
        for raw in ["n64", "Super Nintendo Entertainment System", "Amiga CD32"] {
            let once = tables.canonicalize(raw);
            assert_eq!(tables.canonicalize(&once), once);
        }
    }

    #[test]
    fn unknown_platform_passes_through() {
        let tables = PlatformTables::builtin();
        assert_eq!(tables.canonicalize("Vectrex"), "Vectrex");
        assert_eq!(tables.subpath_for(SourceId::Myrient, "Vectrex"), None);
    }

    #[test]
    fn snes_maps_to_no_intro_subpath() {
        let tables = PlatformTables::builtin();
        let canonical = tables.canonicalize("Super Nintendo Entertainment System");
        assert_eq!(
            tables.subpath_for(SourceId::Myrient, &canonical),
            Some("No-Intro/Nintendo - Super Nintendo Entertainment System")
        );
    }

    #[test]
    fn per_source_lookups_are_independent() {
        let tables = PlatformTables::builtin();
        let canonical = tables.canonicalize("psx");
        assert_eq!(
            tables.subpath_for(SourceId::Myrient, &canonical),
            Some("Redump/Sony - PlayStation")
        );
        assert_eq!(
            tables.subpath_for(SourceId::RomsPure, &canonical),
            Some("sony-playstation")
        );
        assert_eq!(tables.subpath_for(SourceId::EmulatorJs, &canonical), Some("psx"));
    }

    #[test]
    fn emulatorjs_covers_fewer_platforms() {
        let tables = PlatformTables::builtin();
        assert_eq!(
            tables.subpath_for(SourceId::EmulatorJs, "Sony PlayStation 2"),
            None
        );
    }
}
