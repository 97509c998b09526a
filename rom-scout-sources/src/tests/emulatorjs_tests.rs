use super::*;
use std::io::Write;

fn write_titles(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file.flush().unwrap();
    file
}

const TITLES: &str = r#"{
    "snes": ["Super Metroid", "Chrono Trigger", "Earthbound"],
    "gb": ["Tetris"]
}"#;

#[tokio::test]
async fn builds_one_based_play_link() {
    let index = write_titles(TITLES);
    let source = EmulatorJsSource::new(
        PlatformTables::builtin(),
        Some("https://play.test/#"),
        index.path(),
    );
    let links = source.resolve("Chrono Trigger", "snes").await;
    assert_eq!(links.len(), 1);
    // "Chrono Trigger" sits at 0-based position 1, so the fragment is 2.
    assert_eq!(links[0].url, "https://play.test/#/snes---2");
    assert_eq!(links[0].source_label, "EmulatorJS");
    assert_eq!(links[0].disc_number, None);
}

#[tokio::test]
async fn without_base_url_adapter_is_inert() {
    let index = write_titles(TITLES);
    let source = EmulatorJsSource::new(PlatformTables::builtin(), None, index.path());
    assert!(source.resolve("Chrono Trigger", "snes").await.is_empty());
}

#[tokio::test]
async fn platform_without_code_resolves_to_empty() {
    let index = write_titles(TITLES);
    let source = EmulatorJsSource::new(
        PlatformTables::builtin(),
        Some("https://play.test/#/"),
        index.path(),
    );
    assert!(source.resolve("Gran Turismo 3", "ps2").await.is_empty());
}

#[tokio::test]
async fn weak_matches_are_rejected() {
    let index = write_titles(TITLES);
    let source = EmulatorJsSource::new(
        PlatformTables::builtin(),
        Some("https://play.test/#/"),
        index.path(),
    );
    assert!(source.resolve("Doom", "snes").await.is_empty());
}

#[tokio::test]
async fn missing_index_resolves_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = EmulatorJsSource::new(
        PlatformTables::builtin(),
        Some("https://play.test/#/"),
        dir.path().join("none.json"),
    );
    assert!(source.resolve("Tetris", "gb").await.is_empty());
}
