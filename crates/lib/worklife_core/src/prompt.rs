//! Prompt invoker — wraps a user message in the fixed instruction prompt and
//! sends it to the completion model.

use std::sync::Arc;

use tracing::debug;

use crate::llm::{ChatMessage, CompletionClient, LlmError};

/// Instruction turn sent ahead of every user message.
pub const SYSTEM_PROMPT: &str = r#"
You are the Work-Life Balance Diagnostic Agent.

Your task is to analyze the user's work habits, daily routine, and lifestyle patterns.
You must produce a JSON object that strictly follows this schema:

{
  "balanced": boolean,
  "risk_level": "low" | "medium" | "high",
  "summary": "string",
  "signals": ["string"],
  "recommendations": [
    {
      "category": "string",
      "advice": "string",
      "priority": "low" | "medium" | "high"
    }
  ]
}

CRITICAL RULES:
- Output MUST be valid JSON.
- Do NOT include backticks.
- Do NOT include markdown.
- Do NOT include explanations.
- Do NOT include text outside the JSON object.
- Use only the fields listed in the schema.
- Never wrap the JSON in quotes.
- Never respond with multiple JSON blocks.

Your entire response MUST be exactly one JSON object.
"#;

/// The two-turn conversation: instruction, then the user's message.
pub fn build_conversation(user_message: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_message),
    ]
}

/// Sends the analysis prompt through a shared completion client.
#[derive(Clone)]
pub struct PromptInvoker {
    client: Arc<dyn CompletionClient>,
}

impl PromptInvoker {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Returns the model's raw reply. Remote failures propagate unchanged.
    pub async fn invoke(&self, user_message: &str) -> Result<String, LlmError> {
        let conversation = build_conversation(user_message);
        let raw = self.client.complete(&conversation).await?;
        debug!(chars = raw.len(), "received model reply");
        Ok(raw)
    }
}
