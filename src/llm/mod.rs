//! LLM chat-completion client
//!
//! [`ChatApi`] is the seam the transformer calls through; [`LlmHandle`]
//! makes "no credential configured" a first-class state instead of a
//! nullable client.

pub mod deepseek;

pub use deepseek::DeepseekClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// One chat-completion request: a system/user prompt pair plus generation
/// bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// A chat-completion endpoint. Single-shot: no retry, no streaming.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn chat(&self, req: ChatRequest) -> Result<String, LlmError>;
}

/// Process-wide LLM handle, built once at startup and shared read-only.
#[derive(Clone)]
pub enum LlmHandle {
    Configured(Arc<dyn ChatApi>),
    Unconfigured,
}

impl LlmHandle {
    /// Build the handle from configuration. A missing credential yields
    /// `Unconfigured`; transform calls then answer with a fixed degraded
    /// message instead of reaching for the network.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        match &config.api_key {
            Some(key) => {
                let client = DeepseekClient::new(key.clone(), config)?;
                Ok(LlmHandle::Configured(Arc::new(client)))
            }
            None => {
                tracing::warn!("警告: 未找到 OPENAI_API_KEY 环境变量，AI 功能将不可用");
                Ok(LlmHandle::Unconfigured)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, LlmHandle::Configured(_))
    }
}
