//! Search adapter: fallback policy and result filtering
//!
//! Sits between the raw provider and the orchestrator. Implements the
//! two-tier region fallback, the domain blocklist with its filter-discard
//! degradation, and the rule that provider failures become empty result
//! sets rather than errors.

use crate::config::SearchSettings;
use crate::providers::{RawHit, SearchProvider};
use crate::results::{ImageHit, SearchHit};
use crate::FETCH_FLOOR;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Policy layer over a [`SearchProvider`]
pub struct SearchAdapter {
    provider: Arc<dyn SearchProvider>,
    config: SearchSettings,
}

impl SearchAdapter {
    pub fn new(provider: Arc<dyn SearchProvider>, config: SearchSettings) -> Self {
        Self { provider, config }
    }

    /// Text search with region fallback and blocklist filtering. Never
    /// fails: provider errors degrade to an empty list.
    pub async fn search_text(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let fetch = limit.max(FETCH_FLOOR);

        // Primary region first; retry exactly once with the fallback region
        // when the primary comes back empty. Result volume is unreliable
        // enough (rate limits, regional gaps) that one neutral retry pays
        // for itself.
        let raw = match self
            .provider
            .text_search(query, fetch, &self.config.primary_region)
            .await
        {
            Ok(hits) if hits.is_empty() => {
                info!(
                    "empty result set for '{}' in {}, retrying {}",
                    query, self.config.primary_region, self.config.fallback_region
                );
                match self
                    .provider
                    .text_search(query, fetch, &self.config.fallback_region)
                    .await
                {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!("fallback search failed for '{}': {}", query, e);
                        return Vec::new();
                    }
                }
            }
            Ok(hits) => hits,
            Err(e) => {
                warn!("search failed for '{}': {}", query, e);
                return Vec::new();
            }
        };

        let all: Vec<SearchHit> = raw.iter().filter_map(to_hit).collect();

        let filtered: Vec<SearchHit> = all
            .iter()
            .filter(|hit| !hit.url.as_deref().is_some_and(|u| self.is_blocked(u)))
            .cloned()
            .collect();

        // If the blocklist removed everything the provider found, showing
        // the unfiltered list beats showing nothing.
        let mut results = if filtered.is_empty() && !all.is_empty() {
            info!("blocklist removed all {} hits for '{}', discarding filter", all.len(), query);
            all
        } else {
            filtered
        };

        results.truncate(limit);
        results
    }

    /// Image search: single region-biased call, no fallback tier, no domain
    /// filter. Same empty-on-failure degradation.
    pub async fn search_images(&self, query: &str, limit: usize) -> Vec<ImageHit> {
        let raw = match self
            .provider
            .image_search(query, limit, &self.config.primary_region)
            .await
        {
            Ok(images) => images,
            Err(e) => {
                warn!("image search failed for '{}': {}", query, e);
                return Vec::new();
            }
        };

        raw.into_iter()
            .filter_map(|item| {
                // An item without any usable URL is skipped, not fatal
                let url = item.image.or_else(|| item.thumbnail.clone())?;
                if url.is_empty() {
                    return None;
                }
                Some(ImageHit::new(item.title, url, item.thumbnail))
            })
            .take(limit)
            .collect()
    }

    /// Check a hit URL against the configured blocklist. Entries match as
    /// substrings of the host when the URL parses, of the whole URL when it
    /// does not.
    fn is_blocked(&self, raw_url: &str) -> bool {
        let haystack = Url::parse(raw_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
            .unwrap_or_else(|| raw_url.to_string());

        self.config
            .blocked_domains
            .iter()
            .any(|blocked| haystack.contains(blocked.as_str()))
    }
}

/// Build a typed hit from a raw provider item, or skip it when nothing
/// usable survives.
fn to_hit(raw: &RawHit) -> Option<SearchHit> {
    if raw.title.is_none() && raw.url.is_none() && raw.body.is_none() {
        return None;
    }

    let title = raw
        .title
        .clone()
        .or_else(|| raw.url.clone())
        .unwrap_or_else(|| "Result".to_string());
    let snippet = raw.body.clone().unwrap_or_default();

    Some(SearchHit::new(title, raw.url.clone(), &snippet))
}
