//! API server configuration.

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:5500";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("Invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<HeaderValue>,
    /// Replace parsed records that lack the Analysis Record shape with the
    /// fallback record.
    pub strict_schema: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                  |
    /// |--------------------------|--------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:8000`         |
    /// | `CORS_ALLOWED_ORIGINS`   | `http://127.0.0.1:5500`  |
    /// | `ANALYSIS_STRICT_SCHEMA` | `false`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let strict_schema = match std::env::var("ANALYSIS_STRICT_SCHEMA") {
            Ok(raw) => parse_bool("ANALYSIS_STRICT_SCHEMA", &raw)?,
            Err(_) => false,
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            cors_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            )?,
            strict_schema,
        })
    }
}

/// Parse a comma-separated origin list, skipping blank entries.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                // Credentialed CORS cannot use a wildcard origin.
                return Err(ConfigError::InvalidOrigin(origin.to_string()));
            }
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect()
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}
