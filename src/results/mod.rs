//! Result types shared across the orchestration pipeline
//!
//! These are the typed values that cross the adapter boundaries; they are
//! immutable once produced.

use crate::SNIPPET_MAX_LEN;
use serde::{Deserialize, Serialize};

/// Where a text hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitSource {
    Duckduckgo,
    Ai,
    Fusion,
}

/// A single web search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title
    pub title: String,
    /// Result URL; absent for synthetic hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Content snippet, capped at [`SNIPPET_MAX_LEN`] characters
    pub snippet: String,
    /// Originating source
    pub source: HitSource,
    /// Relevance score when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a provider hit, applying the snippet cap.
    pub fn new(title: impl Into<String>, url: Option<String>, snippet: &str) -> Self {
        Self {
            title: title.into(),
            url: url.filter(|u| !u.is_empty()),
            snippet: truncate_snippet(snippet),
            source: HitSource::Duckduckgo,
            score: None,
        }
    }

    /// Create a synthetic hit wrapping combined provider text.
    pub fn synthetic(title: impl Into<String>, text: &str) -> Self {
        Self {
            title: title.into(),
            url: None,
            snippet: truncate_snippet(text),
            source: HitSource::Duckduckgo,
            score: None,
        }
    }
}

/// A single image search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageHit {
    /// Image title when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Full-size image URL
    pub url: String,
    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Originating provider name
    pub source: String,
}

impl ImageHit {
    pub fn new(title: Option<String>, url: String, thumbnail: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            url,
            thumbnail: thumbnail.filter(|t| !t.is_empty()),
            source: "duckduckgo".to_string(),
        }
    }
}

/// Parsed summarizer output. Always well-typed: a payload that fails to
/// parse lands verbatim in `answer` with both lists empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResult {
    pub answer: String,
    pub takeaways: Vec<String>,
    pub followups: Vec<String>,
}

/// Cap a snippet at [`SNIPPET_MAX_LEN`] characters, not bytes, so the cut
/// never splits a multi-byte character.
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_LEN {
        text.to_string()
    } else {
        text.chars().take(SNIPPET_MAX_LEN).collect()
    }
}
