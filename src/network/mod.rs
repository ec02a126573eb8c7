//! HTTP networking module
//!
//! Provides the outbound HTTP client used for provider and LLM calls.

mod client;

pub use client::{HttpClient, HttpResponse};
