//! DeepSeek chat client (OpenAI-compatible wire format)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatApi, ChatRequest};
use crate::config::LlmConfig;
use crate::error::LlmError;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Client for an OpenAI-format `/chat/completions` endpoint.
pub struct DeepseekClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl DeepseekClient {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::Api(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatApi for DeepseekClient {
    async fn chat(&self, req: ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: &req.system,
                },
                Message {
                    role: "user",
                    content: &req.user,
                },
            ],
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        tracing::debug!(model = %self.model, max_tokens = req.max_tokens, "calling chat completion");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, detail)));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Malformed("响应中没有生成结果".to_string()))
    }
}

fn classify(err: reqwest::Error) -> LlmError {
    if err.is_connect() || err.is_timeout() {
        LlmError::Connectivity(err.to_string())
    } else {
        LlmError::Api(err.to_string())
    }
}
