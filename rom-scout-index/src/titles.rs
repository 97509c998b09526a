//! Structured title index: short platform code → ordered title list.
//!
//! Used by sources that publish their library as per-system title lists
//! instead of a crawlable file tree. Title positions are 0-based here;
//! link construction converts to whatever addressing the source expects.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::IndexError;

/// Mapping of system short code (e.g., "snes") to its ordered titles.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    systems: HashMap<String, Vec<String>>,
}

impl TitleIndex {
    /// Load from a JSON file shaped `{"snes": ["Title A", "Title B"], ...}`.
    ///
    /// Missing or unparseable files yield an empty index with a warning,
    /// mirroring [`crate::CatalogIndex::load`].
    pub fn load(path: &Path) -> Self {
        let systems = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!(
                        "title index {} is not valid JSON ({e}); treating as empty",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(e) => {
                log::warn!(
                    "title index {} not readable ({e}); treating as empty",
                    path.display()
                );
                HashMap::new()
            }
        };
        Self { systems }
    }

    /// Titles for a system code, in index order. Empty when the code is
    /// unknown.
    pub fn titles_for(&self, code: &str) -> &[String] {
        self.systems.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Build the index from a directory of per-system config files and
    /// write it to `output`.
    ///
    /// Every `*.json` file in `config_dir` describes one system: the
    /// filename stem is the system code, and the `items` object maps
    /// each title to its launch configuration. Titles are collected in
    /// document order; positions address the play URLs, so the order
    /// must match the deployed instance. Files that fail to parse or
    /// carry no `items` object are skipped with a warning; only a
    /// filesystem failure aborts the build.
    pub fn build_from_configs(config_dir: &Path, output: &Path) -> Result<Self, IndexError> {
        let mut names: Vec<_> = fs::read_dir(config_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "json")
            })
            .collect();
        names.sort();

        let mut systems: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for path in names {
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let contents = fs::read_to_string(&path)?;
            let config: serde_json::Value = match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("could not parse {} ({e}); skipping", path.display());
                    continue;
                }
            };
            match config.get("items").and_then(|v| v.as_object()) {
                Some(items) if !items.is_empty() => {
                    systems.insert(code.to_string(), items.keys().cloned().collect());
                }
                _ => {
                    log::warn!("no items found in {}; skipping", path.display());
                }
            }
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, serde_json::to_string_pretty(&systems)?)?;

        Ok(Self {
            systems: systems.into_iter().collect(),
        })
    }

    /// Known system codes, sorted for stable output.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.systems.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_and_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"snes": ["Chrono Trigger", "Super Metroid"], "gb": ["Tetris"]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let index = TitleIndex::load(file.path());
        assert_eq!(index.titles_for("snes").len(), 2);
        assert_eq!(index.titles_for("snes")[0], "Chrono Trigger");
        assert_eq!(index.titles_for("gb"), ["Tetris"]);
        assert!(index.titles_for("n64").is_empty());
    }

    #[test]
    fn build_collects_titles_per_config_file() {
        let configs = tempfile::tempdir().unwrap();
        fs::write(
            configs.path().join("snes.json"),
            r#"{"items": {"Super Metroid": {"core": "snes9x"}, "Chrono Trigger": {}}}"#,
        )
        .unwrap();
        fs::write(configs.path().join("gb.json"), r#"{"items": {"Tetris": {}}}"#).unwrap();
        fs::write(configs.path().join("notes.txt"), "not a config").unwrap();

        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("titles.json");
        let built = TitleIndex::build_from_configs(configs.path(), &output).unwrap();

        assert_eq!(built.codes(), ["gb", "snes"]);
        // Positions address play URLs, so document order must survive.
        assert_eq!(built.titles_for("snes"), ["Super Metroid", "Chrono Trigger"]);

        let reloaded = TitleIndex::load(&output);
        assert_eq!(reloaded.titles_for("snes"), built.titles_for("snes"));
        assert_eq!(reloaded.titles_for("gb"), ["Tetris"]);
    }

    #[test]
    fn build_skips_unparseable_and_itemless_configs() {
        let configs = tempfile::tempdir().unwrap();
        fs::write(configs.path().join("broken.json"), "{not json").unwrap();
        fs::write(configs.path().join("bare.json"), r#"{"name": "no items here"}"#).unwrap();
        fs::write(configs.path().join("empty.json"), r#"{"items": {}}"#).unwrap();
        fs::write(configs.path().join("n64.json"), r#"{"items": {"Mario 64": {}}}"#).unwrap();

        let out = tempfile::tempdir().unwrap();
        let built =
            TitleIndex::build_from_configs(configs.path(), &out.path().join("titles.json"))
                .unwrap();
        assert_eq!(built.codes(), ["n64"]);
    }

    #[test]
    fn build_fails_on_missing_config_dir() {
        let out = tempfile::tempdir().unwrap();
        let result = TitleIndex::build_from_configs(
            &out.path().join("no-such-dir"),
            &out.path().join("titles.json"),
        );
        assert!(matches!(result, Err(IndexError::Io(_))));
    }

    #[test]
    fn missing_or_invalid_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TitleIndex::load(&dir.path().join("nope.json")).is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert!(TitleIndex::load(file.path()).is_empty());
    }
}
