//! GOG-Games adapter: live search for PC titles. Stricter threshold than
//! the console sources since PC search pages return loosely related
//! results.

use async_trait::async_trait;
use scraper::{Html, Selector};

use rom_scout_core::normalize_title;
use rom_scout_core::similarity::similarity;

use crate::adapter::{absorb, normalize_base_url, DownloadLink, SourceAdapter};
use crate::error::SourceError;

const LABEL: &str = "GOG-Games";
const THRESHOLD: f64 = 85.0;

/// Live-search adapter for GOG-Games (PC platform class only; the
/// aggregator routes accordingly).
pub struct GogGamesSource {
    http: reqwest::Client,
    base_url: String,
}

impl GogGamesSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    async fn search(&self, game_title: &str) -> Result<Vec<DownloadLink>, SourceError> {
        let search_url = format!("{}?search={}", self.base_url, urlencode(game_title));
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
        let best = parse_game_cards(&html)
            .into_iter()
            .map(|(href, name)| {
                let score = similarity(&normalize_title(&name), &query);
                (score, href, name)
            })
            .filter(|(score, _, _)| *score >= THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((score, href, name)) => {
                let url = if href.contains("://") {
                    href
                } else {
                    format!("{}{}", self.base_url, href.trim_start_matches('/'))
                };
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

/// Extract `(href, displayed_name)` from the search results grid.
///
/// Tries the card layout first and falls back to any game-detail anchor,
/// since the site reshuffles its CSS classes between deploys.
fn parse_game_cards(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let card = Selector::parse("a.card").expect("static selector");
    let fallback = Selector::parse(r#"a[href^="/game/"]"#).expect("static selector");
    let title_span = Selector::parse("span").expect("static selector");

    let anchors: Vec<_> = {
        let cards: Vec<_> = document.select(&card).collect();
        if cards.is_empty() {
            document.select(&fallback).collect()
        } else {
            cards
        }
    };

    let mut results = Vec::new();
    for anchor in anchors {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(span) = anchor.select(&title_span).next() else {
            continue;
        };
        let name = span.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }
        results.push((href.to_string(), name));
    }
    results
}

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
impl SourceAdapter for GogGamesSource {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn resolve(&self, game_title: &str, _platform_name: &str) -> Vec<DownloadLink> {
        absorb(LABEL, self.search(game_title).await)
    }
}

#[cfg(test)]
#[path = "tests/goggames_tests.rs"]
mod tests;
