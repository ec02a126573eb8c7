//! Reflex-Search: a local AI-assisted search service written in Rust
//!
//! Fans a user query out to a web-search provider and an LLM completion
//! endpoint, reconciles the two under fallback policies, and serves a
//! combined response over HTTP.

pub mod config;
pub mod network;
pub mod pipeline;
pub mod providers;
pub mod results;
pub mod search;
pub mod summarize;
pub mod web;

pub use config::Settings;
pub use pipeline::Orchestrator;
pub use results::{HitSource, ImageHit, SearchHit, SummaryResult};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum length of a result snippet in characters
pub const SNIPPET_MAX_LEN: usize = 500;

/// Minimum number of hits requested from the provider per call
pub const FETCH_FLOOR: usize = 10;
