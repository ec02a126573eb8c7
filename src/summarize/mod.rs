//! Summarization adapter
//!
//! Formats evidence into a prompt, submits it to the LLM completion
//! endpoint, and tolerantly parses whatever comes back. The LLM is treated
//! as an untrusted text producer: the requested JSON shape is a hope, not a
//! contract, and every missing piece degrades to a typed default.

mod client;
mod prompt;

pub use client::{CompletionClient, CompletionError, HfRouterClient};
pub use prompt::build_prompt;

use crate::results::SummaryResult;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// Expected LLM payload shape. Each key is individually optional and an
/// explicit null counts as absent.
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    final_answer: Option<String>,
    #[serde(default)]
    key_takeaways: Option<Vec<String>>,
    #[serde(default)]
    followups: Option<Vec<String>>,
}

/// Policy layer over a [`CompletionClient`]
pub struct SummaryAdapter {
    client: Arc<dyn CompletionClient>,
}

impl SummaryAdapter {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Summarize the query against the evidence. Never fails: transport and
    /// configuration problems become canned payloads, and those flow through
    /// the same tolerant parse as a real completion.
    pub async fn summarize(&self, query: &str, evidence: &str) -> SummaryResult {
        let prompt = build_prompt(query, evidence);

        let raw = match self.client.complete(&prompt).await {
            Ok(content) => content,
            Err(CompletionError::MissingToken) => {
                warn!("summarization skipped: API token not configured");
                canned_payload("HF_TOKEN not set. Please configure it in the environment.")
            }
            Err(e) => {
                warn!("summarization call failed: {}", e);
                canned_payload(&format!("Summarization call failed: {}", e))
            }
        };

        parse_payload(&raw)
    }
}

/// Build a degraded payload in the shape we asked the LLM for, so it parses
/// like a real one.
fn canned_payload(reason: &str) -> String {
    serde_json::json!({
        "final_answer": reason,
        "key_takeaways": [],
        "followups": [],
    })
    .to_string()
}

/// Tolerant parse of the LLM payload. Unparseable payloads become a
/// plain-text answer; this is the single fallback path, with no retry of
/// the completion call.
fn parse_payload(raw: &str) -> SummaryResult {
    match serde_json::from_str::<SummaryPayload>(raw) {
        Ok(payload) => SummaryResult {
            answer: payload.final_answer.unwrap_or_default(),
            takeaways: payload.key_takeaways.unwrap_or_default(),
            followups: payload.followups.unwrap_or_default(),
        },
        Err(_) => SummaryResult {
            answer: raw.to_string(),
            takeaways: Vec::new(),
            followups: Vec::new(),
        },
    }
}
