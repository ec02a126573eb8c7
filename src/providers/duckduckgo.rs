//! DuckDuckGo search provider implementation
//!
//! Text search scrapes the HTML endpoint; image search goes through the
//! two-step vqd token dance against the i.js JSON endpoint.

use super::{ProviderError, RawHit, RawImage, SearchProvider};
use crate::network::HttpClient;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.result").expect("static selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.result__a").expect("static selector"));
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.result__snippet").expect("static selector"));

/// DuckDuckGo web and image search
pub struct DuckDuckGo {
    client: HttpClient,
    html_url: String,
    base_url: String,
}

impl DuckDuckGo {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            html_url: "https://html.duckduckgo.com/html/".to_string(),
            base_url: "https://duckduckgo.com".to_string(),
        }
    }

    /// Point both endpoints at a custom host. Used by tests against a mock
    /// server.
    pub fn with_base_urls(
        client: HttpClient,
        html_url: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            html_url: html_url.into(),
            base_url: base_url.into(),
        }
    }

    fn parse_html_results(&self, html: &str, limit: usize) -> Vec<RawHit> {
        let document = Html::parse_document(html);
        let mut hits = Vec::new();

        for element in document.select(&RESULT_SELECTOR) {
            if hits.len() >= limit {
                break;
            }

            let title_elem = match element.select(&TITLE_SELECTOR).next() {
                Some(t) => t,
                None => continue,
            };

            let title = title_elem.text().collect::<String>();
            let url = title_elem.value().attr("href").map(|h| h.to_string());

            // Internal redirect stubs carry no destination worth keeping
            if let Some(ref u) = url {
                if u.contains("duckduckgo.com") {
                    continue;
                }
            }

            let body = element
                .select(&SNIPPET_SELECTOR)
                .next()
                .map(|s| s.text().collect::<String>());

            hits.push(RawHit {
                title: (!title.is_empty()).then_some(title),
                url,
                body,
            });
        }

        hits
    }

    /// Fetch the vqd request token the image API requires. DuckDuckGo embeds
    /// it in the search page markup.
    async fn fetch_vqd(&self, query: &str) -> Result<String, ProviderError> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("iax".to_string(), "images".to_string());
        params.insert("ia".to_string(), "images".to_string());

        let response = self
            .client
            .get_with_params(&self.base_url, &params)
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::Http(response.status));
        }

        extract_vqd(&response.text)
            .ok_or_else(|| ProviderError::Parse("vqd token not found".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    #[serde(default)]
    results: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    title: Option<String>,
    image: Option<String>,
    thumbnail: Option<String>,
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn text_search(
        &self,
        query: &str,
        limit: usize,
        region: &str,
    ) -> Result<Vec<RawHit>, ProviderError> {
        let mut form = HashMap::new();
        form.insert("q".to_string(), query.to_string());
        form.insert("b".to_string(), String::new());
        form.insert("kl".to_string(), region.to_string());

        let response = self
            .client
            .post_form(&self.html_url, &form)
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::Http(response.status));
        }

        let hits = self.parse_html_results(&response.text, limit);
        debug!("duckduckgo text search '{}' [{}]: {} hits", query, region, hits.len());
        Ok(hits)
    }

    async fn image_search(
        &self,
        query: &str,
        limit: usize,
        region: &str,
    ) -> Result<Vec<RawImage>, ProviderError> {
        let vqd = self.fetch_vqd(query).await?;

        let mut params = HashMap::new();
        params.insert("l".to_string(), region.to_string());
        params.insert("o".to_string(), "json".to_string());
        params.insert("q".to_string(), query.to_string());
        params.insert("vqd".to_string(), vqd);

        let url = format!("{}/i.js", self.base_url);
        let response = self
            .client
            .get_with_params(&url, &params)
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::Http(response.status));
        }

        let payload: ImagePayload = response
            .json()
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let images = payload
            .results
            .into_iter()
            .take(limit)
            .map(|item| RawImage {
                title: item.title,
                image: item.image,
                thumbnail: item.thumbnail,
            })
            .collect::<Vec<_>>();

        debug!("duckduckgo image search '{}' [{}]: {} images", query, region, images.len());
        Ok(images)
    }
}

/// Pull the vqd token out of the search page. It appears in a handful of
/// quoting styles depending on which bundle DuckDuckGo serves.
fn extract_vqd(html: &str) -> Option<String> {
    for (pattern, terminators) in [("vqd=\"", "\""), ("vqd='", "'"), ("vqd=", "&\"'")] {
        if let Some(start) = html.find(pattern) {
            let rest = &html[start + pattern.len()..];
            let end = rest
                .find(|c: char| terminators.contains(c))
                .unwrap_or(rest.len());
            let token = &rest[..end];
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}
