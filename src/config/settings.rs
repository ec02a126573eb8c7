//! Settings structures for Reflex-Search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub outgoing: OutgoingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            llm: LlmSettings::default(),
            outgoing: OutgoingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (REFLEX_* prefix, plus HF_TOKEN)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("REFLEX_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("REFLEX_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("REFLEX_LLM_URL") {
            self.llm.router_url = val;
        }
        if let Ok(val) = std::env::var("REFLEX_LLM_MODEL") {
            self.llm.model = val;
        }
        // Absence is a soft condition: the summarizer degrades per request
        // rather than failing startup.
        if let Ok(val) = std::env::var("HF_TOKEN") {
            if !val.is_empty() {
                self.llm.api_token = Some(val);
            }
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Allowed CORS origins; a "*" entry enables the wildcard layer
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "*".to_string(),
            ],
        }
    }
}

/// Search provider behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Region bias for the first provider call (DuckDuckGo "kl" code)
    pub primary_region: String,
    /// Region used for the single retry when the primary returns nothing
    pub fallback_region: String,
    /// Hosts to drop from text results, matched as substrings of the URL host
    pub blocked_domains: Vec<String>,
    /// Maximum images returned by the image endpoint
    pub image_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            primary_region: "in-en".to_string(),
            fallback_region: "wt-wt".to_string(),
            blocked_domains: vec![
                "zhihu.com".to_string(),
                "baidu.com".to_string(),
                ".cn".to_string(),
                "jeuxvideo.com".to_string(),
            ],
            image_limit: 12,
        }
    }
}

/// LLM completion endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// OpenAI-compatible chat completions URL
    pub router_url: String,
    /// Model identifier passed in the request body
    pub model: String,
    /// Upper bound on the completion call, in seconds
    pub timeout_secs: u64,
    /// Bearer token; None degrades to a canned summary per request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            router_url: "https://router.huggingface.co/v1/chat/completions".to_string(),
            model: "Qwen/Qwen3-Coder-30B-A3B-Instruct:nebius".to_string(),
            timeout_secs: 120,
            api_token: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds for provider calls
    pub request_timeout: f64,
    /// Pool max size per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
        }
    }
}
