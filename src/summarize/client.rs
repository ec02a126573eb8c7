//! LLM completion client
//!
//! Talks to an OpenAI-compatible chat completions endpoint (the HuggingFace
//! router in the default configuration) with bearer auth and a long timeout.

use crate::config::LlmSettings;
use crate::network::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Completion failure taxonomy
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API token not configured")]
    MissingToken,
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("malformed completion payload: {0}")]
    Payload(String),
}

/// LLM completion boundary. Implementations return the assistant message
/// text; they do not interpret it.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Chat-completions client for the configured router
pub struct HfRouterClient {
    http: HttpClient,
    settings: LlmSettings,
}

impl HfRouterClient {
    pub fn new(http: HttpClient, settings: LlmSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl CompletionClient for HfRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        // No token means no network call at all; the caller degrades
        let token = self
            .settings
            .api_token
            .as_deref()
            .ok_or(CompletionError::MissingToken)?;

        let body = serde_json::json!({
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "model": self.settings.model,
        });

        debug!("submitting completion to {} ({})", self.settings.router_url, self.settings.model);

        let response = self
            .http
            .post_json_authed(
                &self.settings.router_url,
                token,
                &body,
                Duration::from_secs(self.settings.timeout_secs),
            )
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(CompletionError::Http(response.status));
        }

        let payload: ChatResponse = response
            .json()
            .map_err(|e| CompletionError::Payload(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Payload("no choices in response".to_string()))
    }
}
