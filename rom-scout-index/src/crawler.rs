//! Resumable index crawler for remote directory-listing trees.
//!
//! Walks an HTTP autoindex (nginx/Apache style) depth-first with an
//! explicit work stack, appending every leaf file's relative path to the
//! flat index. The remaining stack is checkpointed after each directory,
//! so a crash or Ctrl-C loses at most the in-flight directory's
//! unflushed writes. The listing transport sits behind
//! [`DirectoryLister`] so tests drive the traversal from memory.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::checkpoint::CrawlCheckpoint;
use crate::error::IndexError;

/// Flush the output writer at least this often while inside one
/// directory, so partial progress survives abrupt termination.
const FLUSH_EVERY: u64 = 100;

/// One child of a listed directory. `href` is the raw (still
/// percent-encoded) relative link from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub href: String,
    pub is_dir: bool,
}

/// Lists one directory of the remote tree.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List the children of `rel_dir` (encoded path relative to the
    /// root, `""` for the root itself, directories end with `/`).
    ///
    /// `Ok(None)` means the node does not exist — the caller treats the
    /// subtree as empty and moves on.
    async fn list(&self, rel_dir: &str) -> Result<Option<Vec<ListingEntry>>, IndexError>;
}

/// `DirectoryLister` over HTTP: fetches the directory URL and parses the
/// anchor tags of the returned listing page.
pub struct HttpLister {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLister {
    /// `base_url` is the crawl root; a trailing `/` is appended if
    /// missing.
    pub fn new(base_url: &str) -> Result<Self, IndexError> {
        if base_url.is_empty() {
            return Err(IndexError::BadBaseUrl(base_url.to_string()));
        }
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl DirectoryLister for HttpLister {
    async fn list(&self, rel_dir: &str) -> Result<Option<Vec<ListingEntry>>, IndexError> {
        let url = format!("{}{}", self.base_url, rel_dir);
        let resp = self.http.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        let html = resp.text().await?;
        Ok(Some(parse_listing(&html)))
    }
}

/// Extract child links from an autoindex page.
///
/// Keeps relative hrefs only; parent links, query links (sort headers),
/// fragments, and absolute URLs are navigation chrome, not tree nodes.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("static selector");

    let mut entries = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.is_empty()
            || href.starts_with('?')
            || href.starts_with('#')
            || href.starts_with('/')
            || href.starts_with("../")
            || href == ".."
            || href.contains("://")
        {
            continue;
        }
        entries.push(ListingEntry {
            href: href.to_string(),
            is_dir: href.ends_with('/'),
        });
    }
    entries
}

/// Decode `%XX` escapes. Autoindex hrefs are percent-encoded; the flat
/// index stores human-readable paths so the matcher sees real filenames.
pub(crate) fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            if let Ok(byte) = u8::from_str_radix(&s[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Outcome of a completed crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub files_written: u64,
    pub directories_visited: u64,
    pub resumed: bool,
}

/// Builds or refreshes a flat catalog index by walking a remote tree.
pub struct IndexCrawler<L> {
    lister: L,
    index_path: PathBuf,
    checkpoint_path: PathBuf,
}

impl<L: DirectoryLister> IndexCrawler<L> {
    pub fn new(lister: L, index_path: impl Into<PathBuf>, checkpoint_path: impl Into<PathBuf>) -> Self {
        Self {
            lister,
            index_path: index_path.into(),
            checkpoint_path: checkpoint_path.into(),
        }
    }

    /// Run the crawl. With `resume = true` and both a checkpoint and a
    /// non-empty index present, the pending stack is reloaded and new
    /// entries are appended; otherwise a fresh crawl replaces any
    /// previous output and checkpoint.
    ///
    /// Missing remote nodes and transient fetch failures skip the
    /// affected subtree and keep crawling. Only a corrupt checkpoint or
    /// a local I/O failure aborts the run, and the index file stays
    /// valid up to its last flush.
    pub async fn crawl(&self, resume: bool) -> Result<CrawlSummary, IndexError> {
        let (mut stack, mut files_written, resumed) = self.starting_state(resume)?;

        let file = if resumed {
            OpenOptions::new().append(true).open(&self.index_path)?
        } else {
            if let Some(parent) = self.index_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            File::create(&self.index_path)?
        };
        let mut writer = BufWriter::new(file);
        let mut directories_visited = 0u64;
        let mut unflushed = 0u64;

        while let Some(dir) = stack.pop_back() {
            let listing = match self.lister.list(&dir).await {
                Ok(Some(entries)) => entries,
                Ok(None) => {
                    log::warn!("'{dir}' not found on remote; skipping subtree");
                    Vec::new()
                }
                Err(e) => {
                    log::warn!("failed to list '{dir}': {e}; skipping subtree");
                    Vec::new()
                }
            };

            for entry in listing {
                let child = format!("{dir}{}", entry.href);
                if entry.is_dir {
                    stack.push_back(child);
                } else {
                    writeln!(writer, "{}", percent_decode(&child))?;
                    files_written += 1;
                    unflushed += 1;
                    if unflushed >= FLUSH_EVERY {
                        writer.flush()?;
                        unflushed = 0;
                    }
                }
            }

            directories_visited += 1;

            // Flush before checkpointing so the checkpoint never claims
            // entries the index file doesn't have.
            writer.flush()?;
            unflushed = 0;
            CrawlCheckpoint {
                pending_dirs: stack.iter().cloned().collect(),
                entries_written: files_written,
            }
            .save(&self.checkpoint_path)?;
        }

        writer.flush()?;
        CrawlCheckpoint::clear(&self.checkpoint_path)?;

        Ok(CrawlSummary {
            files_written,
            directories_visited,
            resumed,
        })
    }

    /// Decide between resuming and starting fresh.
    fn starting_state(&self, resume: bool) -> Result<(VecDeque<String>, u64, bool), IndexError> {
        if resume {
            let checkpoint = CrawlCheckpoint::load(&self.checkpoint_path)?;
            let have_output = std::fs::metadata(&self.index_path)
                .map(|m| m.len() > 0)
                .unwrap_or(false);
            if let Some(checkpoint) = checkpoint {
                if have_output {
                    log::info!(
                        "resuming crawl: {} directories pending, {} entries written",
                        checkpoint.pending_dirs.len(),
                        checkpoint.entries_written
                    );
                    return Ok((
                        checkpoint.pending_dirs.into(),
                        checkpoint.entries_written,
                        true,
                    ));
                }
                log::warn!("checkpoint found but index output is missing or empty; starting fresh");
            }
        }
        CrawlCheckpoint::clear(&self.checkpoint_path)?;
        Ok((VecDeque::from([String::new()]), 0, false))
    }
}

#[cfg(test)]
#[path = "tests/crawler_tests.rs"]
mod tests;
