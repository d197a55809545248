//! OpenAI-compatible chat-completions client.
//!
//! Posts to `{base_url}/chat/completions`, which Groq, OpenAI and Ollama all
//! serve. One request per call; retries are left to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmConfig;
use super::{ChatMessage, CompletionClient, LlmError};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Long-lived completion client; clone the `reqwest::Client` handle freely.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http: Client,
    config: LlmConfig,
}

impl OpenAiCompatibleClient {
    /// Build the client once; the HTTP connection pool is reused across calls.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let url = self.config.completions_url();
        debug!(url = %url, model = %self.config.model, turns = messages.len(), "sending completion request");

        let mut req = self.http.post(&url).json(&ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        });
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(LlmError::Status { status, body });
        }

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Completion response parse error: {e}")))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Response("Completion returned no content".to_string()))
    }
}
