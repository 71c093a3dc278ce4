//! Server configuration

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// LLM endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API credential; absent means LLM features run degraded
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,

    /// Model name passed on every completion call
    pub model: String,

    /// Request timeout in seconds (long completions take a while)
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Caption retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Request timeout in seconds for caption provider calls
    pub request_timeout_secs: u64,

    /// Maximum attempts of the full language-fallback sequence
    pub max_attempts: u32,

    /// Fixed wait between attempts in seconds
    pub retry_backoff_secs: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_attempts: 3,
            retry_backoff_secs: 2,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Origins allowed for cross-origin requests; empty or "*" allows any
    pub allowed_origins: Vec<String>,

    /// LLM endpoint configuration
    pub llm: LlmConfig,

    /// Caption retrieval configuration
    pub captions: CaptionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string(),
                "https://easy-youtube-chi.vercel.app".to_string(),
                "*".to_string(),
            ],
            llm: LlmConfig::default(),
            captions: CaptionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig =
            toml::from_str(&content).map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Apply environment overrides on top of file/default values.
    ///
    /// `PORT` overrides the listen port and `OPENAI_API_KEY` supplies the
    /// LLM credential, matching how the service has always been deployed.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("ignoring unparseable PORT value: {}", port),
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = Some(key);
            }
        }
        self
    }
}
