//! RomsPure adapter: live search against the site's per-platform search
//! page. No local index; each resolution is one HTTP request.

use async_trait::async_trait;
use scraper::{Html, Selector};

use rom_scout_core::similarity::similarity;
use rom_scout_core::{normalize_title, PlatformTables, SourceId};

use crate::adapter::{absorb, normalize_base_url, DownloadLink, SourceAdapter};
use crate::error::SourceError;

const LABEL: &str = "RomsPure";
const THRESHOLD: f64 = 70.0;

/// Live-search adapter for RomsPure.
pub struct RomsPureSource {
    tables: PlatformTables,
    http: reqwest::Client,
    base_url: String,
}

impl RomsPureSource {
    pub fn new(tables: PlatformTables, base_url: &str) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            tables,
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    async fn search(&self, game_title: &str, platform_name: &str) -> Result<Vec<DownloadLink>, SourceError> {
        let canonical = self.tables.canonicalize(platform_name);
        let slug = self
            .tables
            .subpath_for(SourceId::RomsPure, &canonical)
            .ok_or_else(|| SourceError::NoPlatformMapping(canonical.clone()))?;

        let search_url = format!(
            "{}roms/{slug}?keywords={}&orderby=popular&order=desc",
            self.base_url,
            urlencode(game_title)
        );
        log::debug!("[{LABEL}] searching {search_url}");

        let resp = self.http.get(&search_url).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::RemoteStatus {
                status: resp.status().as_u16(),
                url: search_url,
            });
        }
        let html = resp.text().await?;

        let query = normalize_title(game_title);
        let expect_prefix = format!("/roms/{slug}/");
        let best = parse_search_results(&html, &expect_prefix)
            .into_iter()
            .map(|(url, name)| {
                let score = similarity(&normalize_title(&name), &query);
                (score, url, name)
            })
            .filter(|(score, _, _)| *score >= THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((score, url, name)) => {
                log::debug!("[{LABEL}] best match '{name}' (score {score:.0}) => {url}");
                Ok(vec![DownloadLink {
                    source_label: LABEL,
                    url,
                    disc_number: None,
                }])
            }
            None => Err(SourceError::NoQualifyingCandidate(game_title.to_string())),
        }
    }
}

/// Pull `(detail_url, displayed_name)` pairs out of a search results page.
///
/// Only links whose path sits under the expected platform prefix count;
/// the search page mixes in cross-platform suggestions.
fn parse_search_results(html: &str, expect_prefix: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let container = Selector::parse("div.col-archive-item").expect("static selector");
    let link = Selector::parse(r#"a[href*="/roms/"]"#).expect("static selector");
    let heading = Selector::parse("h3").expect("static selector");

    let mut results = Vec::new();
    for item in document.select(&container) {
        let Some(anchor) = item.select(&link).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let path = href
            .split_once("://")
            .and_then(|(_, rest)| rest.find('/').map(|i| &rest[i..]))
            .unwrap_or(href);
        if !path.starts_with(expect_prefix) {
            continue;
        }
        let Some(h3) = item.select(&heading).next() else {
            continue;
        };
        let name = h3.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }
        results.push((href.to_string(), name));
    }
    results
}

/// Minimal query-string encoding for the search keyword.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[async_trait]
impl SourceAdapter for RomsPureSource {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn resolve(&self, game_title: &str, platform_name: &str) -> Vec<DownloadLink> {
        absorb(LABEL, self.search(game_title, platform_name).await)
    }
}

#[cfg(test)]
#[path = "tests/romspure_tests.rs"]
mod tests;
