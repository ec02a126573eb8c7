//! Search provider module
//!
//! Defines the SearchProvider trait plus the DuckDuckGo implementation.
//! Providers return raw, unvalidated items; the adapter layer in
//! [`crate::search`] turns those into typed hits under the fallback policy.

mod duckduckgo;

pub use duckduckgo::DuckDuckGo;

use async_trait::async_trait;
use thiserror::Error;

/// A raw text result as the provider reports it. Every field is optional:
/// individual malformed items are the provider's problem, not ours, and the
/// adapter skips whatever it cannot use.
#[derive(Debug, Clone, Default)]
pub struct RawHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
}

/// A raw image result as the provider reports it
#[derive(Debug, Clone, Default)]
pub struct RawImage {
    pub title: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
}

/// Provider failure taxonomy
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

/// External web-search provider boundary. Implementations issue the network
/// call and parse the payload; they do not filter, rank, or degrade.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Run a region-biased text search
    async fn text_search(
        &self,
        query: &str,
        limit: usize,
        region: &str,
    ) -> Result<Vec<RawHit>, ProviderError>;

    /// Run a region-biased image search
    async fn image_search(
        &self,
        query: &str,
        limit: usize,
        region: &str,
    ) -> Result<Vec<RawImage>, ProviderError>;
}
