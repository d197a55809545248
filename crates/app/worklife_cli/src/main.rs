// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use serde_json::{Map, Value, json};
use worklife_core::llm::config::LlmConfig;
use worklife_core::llm::openai::OpenAiCompatibleClient;
use worklife_core::normalize::{NormalizeMode, normalize_detailed};
use worklife_core::pipeline::Analyzer;

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Normalize { file, strict } => {
            let raw = read_input(file.as_deref())?;
            let normalized = normalize_detailed(&raw, mode(*strict));
            log::info!("parsed via {}", normalized.source);
            print_record(&normalized.record)?;
        }
        Commands::Analyze { message, strict } => {
            let client = OpenAiCompatibleClient::new(LlmConfig::from_env()?)?;
            let analyzer = Analyzer::new(Arc::new(client), mode(*strict));
            let record = runtime()?.block_on(analyzer.analyze(message))?;
            print_record(&record)?;
        }
        Commands::Probe { message, url } => {
            let (status, body) = runtime()?.block_on(probe(url, message))?;
            println!("Status code: {status}");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn mode(strict: bool) -> NormalizeMode {
    if strict {
        NormalizeMode::Strict
    } else {
        NormalizeMode::PassThrough
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn print_record(record: &Map<String, Value>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Post a supervisor-style transcript (system turn, then user turn).
async fn probe(url: &str, message: &str) -> Result<(u16, Value)> {
    let payload = json!({
        "messages": [
            {"role": "system", "content": "You are the supervisor agent."},
            {"role": "user", "content": message}
        ]
    });

    let resp = reqwest::Client::new().post(url).json(&payload).send().await?;
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    let body = serde_json::from_str(&text)
        .map_err(|_| Error::Custom(format!("server returned non-JSON body: {text}")))?;
    Ok((status, body))
}
