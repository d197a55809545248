//! Completion client configuration.
//!
//! Resolved from environment variables, with per-provider defaults for the
//! base URL, API key variable and model.

use std::env;
use std::time::Duration;

use super::LlmError;

pub const DEFAULT_PROVIDER: &str = "groq";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Provider name → endpoint and credential defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderMapping {
    pub base_url: &'static str,
    /// Env var holding the API key, if the provider needs one.
    pub api_key_env: Option<&'static str>,
    pub default_model: &'static str,
}

pub fn get_provider_mapping(provider: &str) -> Option<ProviderMapping> {
    match provider {
        "groq" => Some(ProviderMapping {
            base_url: "https://api.groq.com/openai/v1",
            api_key_env: Some("GROQ_API_KEY"),
            default_model: "llama-3.3-70b-versatile",
        }),
        "openai" => Some(ProviderMapping {
            base_url: "https://api.openai.com/v1",
            api_key_env: Some("OPENAI_API_KEY"),
            default_model: "gpt-4o-mini",
        }),
        "ollama" => Some(ProviderMapping {
            base_url: "http://localhost:11434/v1",
            api_key_env: None,
            default_model: "llama3.1",
        }),
        _ => None,
    }
}

/// Resolved settings for the chat-completion client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider name: `"groq"`, `"openai"`, or `"ollama"`.
    pub provider: String,
    /// API base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Sampling temperature, kept low for deterministic-leaning output.
    pub temperature: f32,
    /// Transport-level timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl LlmConfig {
    /// Defaults for a known provider, without consulting the environment.
    pub fn for_provider(provider: &str) -> Result<Self, LlmError> {
        let mapping = get_provider_mapping(provider)
            .ok_or_else(|| LlmError::Config(format!("Unknown provider: {provider}")))?;

        Ok(Self {
            provider: provider.to_string(),
            base_url: mapping.base_url.to_string(),
            model: mapping.default_model.to_string(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable           | Default                         |
    /// |--------------------|---------------------------------|
    /// | `LLM_PROVIDER`     | `groq`                          |
    /// | `LLM_BASE_URL`     | provider base URL               |
    /// | `LLM_MODEL`        | provider default model          |
    /// | `LLM_TEMPERATURE`  | `0.2`                           |
    /// | `LLM_TIMEOUT_SECS` | `60`                            |
    /// | provider key var   | `GROQ_API_KEY` / `OPENAI_API_KEY` |
    pub fn from_env() -> Result<Self, LlmError> {
        let provider = env::var("LLM_PROVIDER").unwrap_or_else(|_| DEFAULT_PROVIDER.to_string());
        let mut config = Self::for_provider(&provider)?;

        if let Ok(base_url) = env::var("LLM_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var("LLM_MODEL") {
            config.model = model;
        }
        if let Ok(raw) = env::var("LLM_TEMPERATURE") {
            config.temperature = raw
                .parse()
                .map_err(|_| LlmError::Config(format!("Invalid LLM_TEMPERATURE: {raw}")))?;
        }
        if let Ok(raw) = env::var("LLM_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| LlmError::Config(format!("Invalid LLM_TIMEOUT_SECS: {raw}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        config.api_key = get_provider_mapping(&provider)
            .and_then(|m| m.api_key_env)
            .and_then(|var| env::var(var).ok())
            .filter(|key| !key.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Checks the base URL, temperature range and presence of a required key.
    pub fn validate(&self) -> Result<(), LlmError> {
        let url: url::Url = self
            .base_url
            .parse()
            .map_err(|_| LlmError::Config(format!("Invalid base URL: {}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LlmError::Config(format!(
                "Base URL must use http or https: {}",
                self.base_url
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::Config(format!(
                "Temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        if let Some(var) = get_provider_mapping(&self.provider).and_then(|m| m.api_key_env)
            && self.api_key.is_none()
        {
            return Err(LlmError::Config(format!(
                "{var} is required for {} provider",
                self.provider
            )));
        }

        Ok(())
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
