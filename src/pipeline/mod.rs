//! Orchestration pipeline
//!
//! Sequences the search and summarization adapters per request mode,
//! assembles the typed responses, and measures wall-clock latency. Every
//! sub-call has already degraded to a safe default by the time assembly
//! happens, so none of these methods can fail.

use crate::config::SearchSettings;
use crate::results::{ImageHit, SearchHit, SummaryResult};
use crate::search::SearchAdapter;
use crate::summarize::SummaryAdapter;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Title given to the synthetic hit wrapping combined provider text
const SYNTHETIC_TITLE: &str = "Web result from DuckDuckGo";

/// Requested response mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    All,
    Web,
    Ai,
}

/// Inbound request body shared by all three POST endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    6
}

/// Combined search + summary response (`POST /search`)
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub refined_query: String,
    pub mode: Mode,
    pub results: Vec<SearchHit>,
    pub ai_summary: String,
    pub key_takeaways: Vec<String>,
    pub followup_questions: Vec<String>,
    pub latency_ms: u64,
}

/// Raw web search response (`POST /web_search`)
#[derive(Debug, Serialize)]
pub struct WebSearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub latency_ms: u64,
}

/// Image search response (`POST /image_search`)
#[derive(Debug, Serialize)]
pub struct ImageSearchResponse {
    pub query: String,
    pub images: Vec<ImageHit>,
    pub latency_ms: u64,
}

/// Sequences adapter calls and assembles responses
pub struct Orchestrator {
    search: SearchAdapter,
    summarizer: SummaryAdapter,
    config: SearchSettings,
}

impl Orchestrator {
    pub fn new(search: SearchAdapter, summarizer: SummaryAdapter, config: SearchSettings) -> Self {
        Self {
            search,
            summarizer,
            config,
        }
    }

    /// Combined pipeline: gather web evidence, summarize it, return both.
    pub async fn run_search(&self, req: &SearchRequest) -> SearchResponse {
        let start = Instant::now();

        // Evidence is gathered for every mode, "ai" included: the
        // summarizer needs grounding text either way.
        let hits = self.search.search_text(&req.query, req.max_results).await;

        // The combined mode wraps the provider text as one synthetic hit;
        // the raw hit sequence belongs to /web_search.
        let web_text = hits
            .iter()
            .map(|h| h.snippet.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut results: Vec<SearchHit> = Vec::new();
        if !web_text.is_empty() {
            results.push(SearchHit::synthetic(SYNTHETIC_TITLE, &web_text));
        }

        let evidence = results
            .iter()
            .take(req.max_results)
            .map(|h| h.snippet.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let summary: SummaryResult = self.summarizer.summarize(&req.query, &evidence).await;

        results.truncate(req.max_results);
        let latency_ms = start.elapsed().as_millis() as u64;

        info!("search '{}' completed in {}ms", req.query, latency_ms);

        SearchResponse {
            query: req.query.clone(),
            refined_query: req.query.clone(),
            mode: req.mode,
            results,
            ai_summary: summary.answer,
            key_takeaways: summary.takeaways,
            followup_questions: summary.followups,
            latency_ms,
        }
    }

    /// Raw web search: full hit sequence from the adapter, no summarization.
    pub async fn run_web_search(&self, req: &SearchRequest) -> WebSearchResponse {
        let start = Instant::now();

        let results = self.search.search_text(&req.query, req.max_results).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        info!(
            "web_search '{}' returned {} results in {}ms",
            req.query,
            results.len(),
            latency_ms
        );

        WebSearchResponse {
            query: req.query.clone(),
            results,
            latency_ms,
        }
    }

    /// Image search, bound to the configured endpoint cap.
    pub async fn run_image_search(&self, req: &SearchRequest) -> ImageSearchResponse {
        let start = Instant::now();

        let images = self
            .search
            .search_images(&req.query, self.config.image_limit)
            .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        info!(
            "image_search '{}' returned {} images in {}ms",
            req.query,
            images.len(),
            latency_ms
        );

        ImageSearchResponse {
            query: req.query.clone(),
            images,
            latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProviderError, RawHit, RawImage, SearchProvider};
    use crate::summarize::{CompletionClient, CompletionError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct StubProvider {
        hits: Vec<RawHit>,
        delay: Duration,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn text_search(
            &self,
            _query: &str,
            _limit: usize,
            _region: &str,
        ) -> Result<Vec<RawHit>, ProviderError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.hits.clone())
        }

        async fn image_search(
            &self,
            _query: &str,
            limit: usize,
            _region: &str,
        ) -> Result<Vec<RawImage>, ProviderError> {
            Ok((0..20)
                .take(limit)
                .map(|i| RawImage {
                    title: Some(format!("img{}", i)),
                    image: Some(format!("https://img.example/{}.jpg", i)),
                    thumbnail: None,
                })
                .collect())
        }
    }

    /// Records the prompt it was handed and replies with a fixed payload
    struct RecordingClient {
        payload: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.payload.clone())
        }
    }

    fn raw_hit(i: usize, host: &str) -> RawHit {
        RawHit {
            title: Some(format!("hit {}", i)),
            url: Some(format!("https://{}/{}", host, i)),
            body: Some(format!("snippet {}", i)),
        }
    }

    fn orchestrator(
        hits: Vec<RawHit>,
        delay: Duration,
        payload: &str,
    ) -> (Orchestrator, Arc<RecordingClient>) {
        let config = crate::config::SearchSettings::default();
        let provider = Arc::new(StubProvider { hits, delay });
        let client = Arc::new(RecordingClient {
            payload: payload.to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let orchestrator = Orchestrator::new(
            SearchAdapter::new(provider, config.clone()),
            SummaryAdapter::new(client.clone()),
            config,
        );
        (orchestrator, client)
    }

    fn request(mode: Mode, max_results: usize) -> SearchRequest {
        SearchRequest {
            query: "rust ownership".to_string(),
            mode,
            max_results,
        }
    }

    const PAYLOAD: &str = r#"{"final_answer":"A","key_takeaways":["k"],"followups":["f"]}"#;

    #[tokio::test]
    async fn test_run_search_wraps_synthetic_hit() {
        let (orchestrator, _) = orchestrator(
            vec![raw_hit(1, "example.com"), raw_hit(2, "example.org")],
            Duration::ZERO,
            PAYLOAD,
        );

        let response = orchestrator.run_search(&request(Mode::All, 6)).await;
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, SYNTHETIC_TITLE);
        assert!(response.results[0].url.is_none());
        assert!(response.results[0].snippet.contains("snippet 1"));
        assert_eq!(response.ai_summary, "A");
        assert_eq!(response.key_takeaways, vec!["k"]);
        assert_eq!(response.followup_questions, vec!["f"]);
        assert_eq!(response.refined_query, "rust ownership");
    }

    #[tokio::test]
    async fn test_ai_mode_still_gathers_evidence() {
        let (orchestrator, client) = orchestrator(
            vec![raw_hit(1, "example.com")],
            Duration::ZERO,
            PAYLOAD,
        );

        orchestrator.run_search(&request(Mode::Ai, 6)).await;

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("snippet 1"));
    }

    #[tokio::test]
    async fn test_no_evidence_prompts_placeholder() {
        let (orchestrator, client) = orchestrator(Vec::new(), Duration::ZERO, PAYLOAD);

        let response = orchestrator.run_search(&request(Mode::All, 6)).await;
        assert!(response.results.is_empty());

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("(no web evidence available)"));
    }

    #[tokio::test]
    async fn test_plain_text_payload_is_verbatim_answer() {
        let (orchestrator, _) = orchestrator(
            vec![raw_hit(1, "example.com")],
            Duration::ZERO,
            "not json at all",
        );

        let response = orchestrator.run_search(&request(Mode::All, 6)).await;
        assert_eq!(response.ai_summary, "not json at all");
        assert!(response.key_takeaways.is_empty());
        assert!(response.followup_questions.is_empty());
    }

    #[tokio::test]
    async fn test_latency_tracks_injected_delay() {
        let (orchestrator, _) = orchestrator(
            vec![raw_hit(1, "example.com")],
            Duration::from_millis(30),
            PAYLOAD,
        );

        let response = orchestrator.run_search(&request(Mode::All, 6)).await;
        assert!(response.latency_ms >= 30);
    }

    #[tokio::test]
    async fn test_web_search_blocklist_scenario() {
        // 5 hits, 2 on the blocklist, max_results 3: exactly the 3
        // non-blocked hits come back, truncated appropriately.
        let (orchestrator, _) = orchestrator(
            vec![
                raw_hit(1, "example.com"),
                raw_hit(2, "zhihu.com"),
                raw_hit(3, "example.org"),
                raw_hit(4, "baidu.com"),
                raw_hit(5, "example.net"),
            ],
            Duration::ZERO,
            PAYLOAD,
        );

        let response = orchestrator.run_web_search(&request(Mode::Web, 3)).await;
        assert_eq!(response.results.len(), 3);
        let titles: Vec<&str> = response.results.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["hit 1", "hit 3", "hit 5"]);
    }

    #[tokio::test]
    async fn test_web_search_caps_at_max_results() {
        let hits = (0..10).map(|i| raw_hit(i, "example.com")).collect();
        let (orchestrator, _) = orchestrator(hits, Duration::ZERO, PAYLOAD);

        let response = orchestrator.run_web_search(&request(Mode::Web, 4)).await;
        assert_eq!(response.results.len(), 4);
    }

    #[tokio::test]
    async fn test_image_search_bound_to_endpoint_cap() {
        let (orchestrator, _) = orchestrator(Vec::new(), Duration::ZERO, PAYLOAD);

        let response = orchestrator.run_image_search(&request(Mode::All, 100)).await;
        assert_eq!(response.images.len(), 12);
    }

    #[test]
    fn test_request_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query":"hi"}"#).unwrap();
        assert_eq!(req.mode, Mode::All);
        assert_eq!(req.max_results, 6);
    }
}
