//! Work-life balance agent HTTP server binary.
//!
//! Builds one completion client at startup, shares it across all requests,
//! and serves `GET /health` and `POST /analyze`.

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use worklife_api::config::{ApiConfig, parse_origins};
use worklife_core::llm::config::LlmConfig;
use worklife_core::llm::openai::OpenAiCompatibleClient;
use worklife_core::normalize::NormalizeMode;
use worklife_core::pipeline::Analyzer;

/// CLI arguments for the API server. Unset flags fall back to the
/// environment (see `ApiConfig::from_env` and `LlmConfig::from_env`).
#[derive(Parser, Debug)]
#[command(name = "worklife_api_server", about = "Work-life balance agent API server")]
struct Args {
    /// Address to listen on (e.g. 127.0.0.1:8000; port 0 = ephemeral).
    #[arg(long)]
    bind: Option<String>,

    /// Comma-separated origins allowed for credentialed CORS requests.
    #[arg(long)]
    cors_origins: Option<String>,

    /// Replace parsed records lacking the Analysis Record shape with the fallback.
    #[arg(long, default_value_t = false)]
    strict_schema: bool,

    /// Completion model name (overrides LLM_MODEL).
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,worklife_api=debug,worklife_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(origins) = args.cors_origins.as_deref() {
        config.cors_origins = parse_origins(origins)?;
    }
    config.strict_schema |= args.strict_schema;

    let mut llm_config = LlmConfig::from_env()?;
    if let Some(model) = args.model {
        llm_config.model = model;
    }

    info!(
        provider = %llm_config.provider,
        model = %llm_config.model,
        temperature = llm_config.temperature,
        strict_schema = config.strict_schema,
        "starting worklife_api_server"
    );

    let client = Arc::new(OpenAiCompatibleClient::new(llm_config)?);
    let mode = if config.strict_schema {
        NormalizeMode::Strict
    } else {
        NormalizeMode::PassThrough
    };

    let state = worklife_api::AppState {
        analyzer: Analyzer::new(client, mode),
        config: config.clone(),
    };

    let app = worklife_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to install Ctrl-C handler, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
