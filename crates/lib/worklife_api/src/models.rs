//! Request and response envelopes exchanged with the supervisor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const AGENT_NAME: &str = "work-life-agent";

/// Role tag of a chat turn sent by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// `POST /analyze` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub messages: Vec<Message>,
}

impl AgentRequest {
    /// Content of the last `user` turn, if any.
    pub fn latest_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Envelope returned by `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent_name: String,
    pub status: Status,
    pub data: Option<Value>,
    pub error_message: Option<String>,
}

impl AgentResponse {
    /// Success envelope; the record is wrapped as `{"message": record}`.
    pub fn success(record: Map<String, Value>) -> Self {
        let mut data = Map::new();
        data.insert("message".to_string(), Value::Object(record));
        Self {
            agent_name: AGENT_NAME.to_string(),
            status: Status::Success,
            data: Some(Value::Object(data)),
            error_message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            agent_name: AGENT_NAME.to_string(),
            status: Status::Error,
            data: None,
            error_message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
