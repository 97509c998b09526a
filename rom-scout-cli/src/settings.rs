//! Application settings (`~/.config/rom-scout/settings.toml`).
//!
//! Every field is optional in the file; missing keys fall back to the
//! public endpoints, except the EmulatorJS base URL which has no sane
//! default (the instance is self-hosted) and stays `None`.

use std::path::PathBuf;

const DEFAULT_MYRIENT_BASE: &str = "https://myrient.erista.me/files/";
const DEFAULT_ROMSPURE_BASE: &str = "https://romspure.cc/";
const DEFAULT_GOG_GAMES_BASE: &str = "https://gog-games.to/";

/// Canonical path to the settings file: `~/.config/rom-scout/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rom-scout").join("settings.toml")
}

/// Default directory for index files: `~/.local/share/rom-scout`.
fn default_index_dir() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("rom-scout")
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub myrient_base_url: String,
    pub romspure_base_url: String,
    pub gog_games_base_url: String,
    /// No default; without it the EmulatorJS adapter is disabled.
    pub emulatorjs_base_url: Option<String>,
    pub index_dir: PathBuf,
}

impl Settings {
    /// Load settings from disk, falling back to defaults for anything
    /// missing (including the whole file).
    pub fn load() -> Self {
        match std::fs::read_to_string(settings_path()) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(_) => Self::from_toml_str(""),
        }
    }

    /// Parse a settings document, defaulting every absent key.
    pub fn from_toml_str(contents: &str) -> Self {
        let doc: toml::Value = contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()));

        let get = |table: &str, key: &str| -> Option<String> {
            doc.get(table)?
                .get(key)?
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            myrient_base_url: get("sources", "myrient_base_url")
                .unwrap_or_else(|| DEFAULT_MYRIENT_BASE.to_string()),
            romspure_base_url: get("sources", "romspure_base_url")
                .unwrap_or_else(|| DEFAULT_ROMSPURE_BASE.to_string()),
            gog_games_base_url: get("sources", "gog_games_base_url")
                .unwrap_or_else(|| DEFAULT_GOG_GAMES_BASE.to_string()),
            emulatorjs_base_url: get("sources", "emulatorjs_base_url"),
            index_dir: get("index", "dir")
                .map(PathBuf::from)
                .unwrap_or_else(default_index_dir),
        }
    }

    /// Path of the flat Myrient file index.
    pub fn myrient_index_path(&self) -> PathBuf {
        self.index_dir.join("myrient-index.txt")
    }

    /// Path of the crawl checkpoint that pairs with the Myrient index.
    pub fn myrient_checkpoint_path(&self) -> PathBuf {
        self.index_dir.join("myrient-crawl.json")
    }

    /// Path of the structured EmulatorJS title index.
    pub fn emulatorjs_index_path(&self) -> PathBuf {
        self.index_dir.join("emulatorjs-titles.json")
    }
}
