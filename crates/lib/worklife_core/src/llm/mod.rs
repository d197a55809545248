//! Chat-completion client used by the prompt invoker.
//!
//! The remote model is reached through the [`CompletionClient`] trait so the
//! pipeline can hold one long-lived client (shared across requests) and tests
//! can substitute a scripted one.
//!
//! # Providers
//!
//! - `"groq"` — Groq OpenAI-compatible API (default)
//! - `"openai"` — OpenAI API
//! - `"ollama"` — Ollama OpenAI-compatible local API

pub mod config;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to the remote model.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("Completion response error: {0}")]
    Response(String),
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A remote text-completion model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit a conversation and return the model's reply text, unmodified.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
