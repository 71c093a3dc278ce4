//! Application state
//!
//! Everything the handlers need, built once at startup and shared
//! read-only behind an `Arc`. There is no per-request or cross-request
//! mutable state anywhere.

use std::sync::Arc;

use crate::captions::{CaptionProvider, InnertubeClient};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::llm::LlmHandle;

pub struct AppState {
    pub config: ServerConfig,
    pub captions: Arc<dyn CaptionProvider>,
    pub llm: LlmHandle,
}

impl AppState {
    /// Build the state with the real outbound clients.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let captions = Arc::new(InnertubeClient::new(&config.captions)?);
        let llm = LlmHandle::from_config(&config.llm)?;
        Ok(Self {
            config,
            captions,
            llm,
        })
    }

    /// Build the state around externally supplied providers. Used by tests
    /// to substitute scripted doubles for the network clients.
    pub fn with_providers(
        config: ServerConfig,
        captions: Arc<dyn CaptionProvider>,
        llm: LlmHandle,
    ) -> Self {
        Self {
            config,
            captions,
            llm,
        }
    }
}
