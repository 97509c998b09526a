use super::*;
use std::collections::HashMap;
use std::fs;

/// In-memory tree for driving the crawler without a network.
struct FakeLister {
    dirs: HashMap<String, Vec<ListingEntry>>,
}

impl FakeLister {
    fn new(tree: &[(&str, &[(&str, bool)])]) -> Self {
        let dirs = tree
            .iter()
            .map(|(dir, children)| {
                let entries = children
                    .iter()
                    .map(|(href, is_dir)| ListingEntry {
                        href: (*href).to_string(),
                        is_dir: *is_dir,
                    })
                    .collect();
                ((*dir).to_string(), entries)
            })
            .collect();
        Self { dirs }
    }
}

#[async_trait]
impl DirectoryLister for FakeLister {
    async fn list(&self, rel_dir: &str) -> Result<Option<Vec<ListingEntry>>, IndexError> {
        Ok(self.dirs.get(rel_dir).cloned())
    }
}

fn sample_tree() -> FakeLister {
    FakeLister::new(&[
        (
            "",
            &[
                ("No-Intro/", true),
                ("Redump/", true),
                ("readme.txt", false),
            ],
        ),
        (
            "No-Intro/",
            &[("Nintendo%20-%20Game%20Boy/", true)],
        ),
        (
            "No-Intro/Nintendo%20-%20Game%20Boy/",
            &[
                ("Tetris%20(World).zip", false),
                ("Kirby's%20Dream%20Land%20(USA).zip", false),
            ],
        ),
        (
            "Redump/",
            &[("missing/", true), ("empty/", true)],
        ),
        ("Redump/empty/", &[]),
    ])
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn fresh_crawl_collects_all_files_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let checkpoint = dir.path().join("checkpoint.json");
    let crawler = IndexCrawler::new(sample_tree(), &index, &checkpoint);

    let summary = crawler.crawl(false).await.unwrap();
    assert_eq!(summary.files_written, 3);
    assert!(!summary.resumed);

    let mut lines = read_lines(&index);
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "No-Intro/Nintendo - Game Boy/Kirby's Dream Land (USA).zip",
            "No-Intro/Nintendo - Game Boy/Tetris (World).zip",
            "readme.txt",
        ]
    );
    assert!(!checkpoint.exists(), "checkpoint deleted on completion");
}

#[tokio::test]
async fn missing_subtree_is_skipped_not_fatal() {
    // "Redump/missing/" has no entry in the fake tree, so listing it
    // returns None — the crawl must still complete.
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let crawler = IndexCrawler::new(sample_tree(), &index, dir.path().join("cp.json"));
    let summary = crawler.crawl(false).await.unwrap();
    assert_eq!(summary.files_written, 3);
}

#[tokio::test]
async fn resume_produces_same_entry_set_as_uninterrupted_crawl() {
    let uninterrupted_dir = tempfile::tempdir().unwrap();
    let full_index = uninterrupted_dir.path().join("index.txt");
    IndexCrawler::new(
        sample_tree(),
        &full_index,
        uninterrupted_dir.path().join("cp.json"),
    )
    .crawl(false)
    .await
    .unwrap();
    let mut expected = read_lines(&full_index);
    expected.sort();

    // Simulate a crawl killed after the root directory was processed:
    // root's file is in the output, its subdirectories are still pending.
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let checkpoint = dir.path().join("cp.json");
    fs::write(&index, "readme.txt\n").unwrap();
    CrawlCheckpoint {
        pending_dirs: vec!["No-Intro/".to_string(), "Redump/".to_string()],
        entries_written: 1,
    }
    .save(&checkpoint)
    .unwrap();

    let summary = IndexCrawler::new(sample_tree(), &index, &checkpoint)
        .crawl(true)
        .await
        .unwrap();
    assert!(summary.resumed);
    assert_eq!(summary.files_written, 3);

    let mut resumed = read_lines(&index);
    resumed.sort();
    assert_eq!(resumed, expected);
    assert!(!checkpoint.exists());
}

#[tokio::test]
async fn resume_without_checkpoint_falls_back_to_fresh_crawl() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let summary = IndexCrawler::new(sample_tree(), &index, dir.path().join("cp.json"))
        .crawl(true)
        .await
        .unwrap();
    assert!(!summary.resumed);
    assert_eq!(summary.files_written, 3);
}

#[tokio::test]
async fn fresh_crawl_discards_previous_output_and_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let checkpoint = dir.path().join("cp.json");
    fs::write(&index, "stale/entry.bin\n").unwrap();
    CrawlCheckpoint {
        pending_dirs: vec!["stale/".to_string()],
        entries_written: 1,
    }
    .save(&checkpoint)
    .unwrap();

    IndexCrawler::new(sample_tree(), &index, &checkpoint)
        .crawl(false)
        .await
        .unwrap();

    let lines = read_lines(&index);
    assert!(!lines.iter().any(|l| l.starts_with("stale/")));
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn corrupt_checkpoint_aborts_resume() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.txt");
    let checkpoint = dir.path().join("cp.json");
    fs::write(&index, "something\n").unwrap();
    fs::write(&checkpoint, "{broken").unwrap();

    let result = IndexCrawler::new(sample_tree(), &index, &checkpoint)
        .crawl(true)
        .await;
    assert!(matches!(result, Err(IndexError::CorruptCheckpoint { .. })));
}

#[test]
fn parse_listing_keeps_children_and_drops_chrome() {
    let html = r#"
        <html><body><pre>
        <a href="../">../</a>
        <a href="?C=N;O=D">Name</a>
        <a href="/absolute/">absolute</a>
        <a href="https://example.com/">mirror</a>
        <a href="Nintendo%20-%20Game%20Boy/">Nintendo - Game Boy/</a>
        <a href="Tetris%20(World).zip">Tetris (World).zip</a>
        </pre></body></html>
    "#;
    let entries = parse_listing(html);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].href, "Nintendo%20-%20Game%20Boy/");
    assert!(entries[0].is_dir);
    assert_eq!(entries[1].href, "Tetris%20(World).zip");
    assert!(!entries[1].is_dir);
}

#[test]
fn percent_decode_handles_escapes_and_passthrough() {
    assert_eq!(percent_decode("Tetris%20(World).zip"), "Tetris (World).zip");
    assert_eq!(percent_decode("plain.txt"), "plain.txt");
    assert_eq!(percent_decode("100%25.bin"), "100%.bin");
    assert_eq!(percent_decode("trailing%2"), "trailing%2");
}
