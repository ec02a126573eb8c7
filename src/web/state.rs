//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::pipeline::Orchestrator;
use crate::providers::DuckDuckGo;
use crate::search::SearchAdapter;
use crate::summarize::{HfRouterClient, SummaryAdapter};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Orchestration pipeline
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Wire up the production adapters: DuckDuckGo for search, the
    /// HuggingFace router for completions. Constructed once at startup and
    /// passed in explicitly so tests can substitute fakes.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;

        let provider = Arc::new(DuckDuckGo::new(client.clone()));
        let search = SearchAdapter::new(provider, settings.search.clone());

        let llm = Arc::new(HfRouterClient::new(client, settings.llm.clone()));
        let summarizer = SummaryAdapter::new(llm);

        let orchestrator = Arc::new(Orchestrator::new(
            search,
            summarizer,
            settings.search.clone(),
        ));

        Ok(Self {
            settings: Arc::new(settings),
            orchestrator,
        })
    }

    /// Build state around a pre-wired orchestrator. Test seam.
    pub fn with_orchestrator(settings: Settings, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            settings: Arc::new(settings),
            orchestrator,
        }
    }
}
