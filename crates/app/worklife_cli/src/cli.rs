use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_PROBE_URL: &str = "http://127.0.0.1:8000/analyze";

#[derive(Parser, Debug)]
#[command(name = "worklife", version, about = "Work-life balance agent tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI version
    Version,

    /// Normalize raw model output into an analysis record (offline)
    Normalize {
        /// Read model output from this file instead of stdin
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Substitute the fallback record when the parsed object has the wrong shape
        #[arg(long)]
        strict: bool,
    },

    /// Analyze a message with the configured completion model
    Analyze {
        /// Description of the user's routine
        message: String,

        /// Substitute the fallback record when the parsed object has the wrong shape
        #[arg(long)]
        strict: bool,
    },

    /// Send a supervisor-style request to a running API server
    Probe {
        /// Message sent as the user turn
        message: String,

        #[arg(long, default_value = DEFAULT_PROBE_URL)]
        url: String,
    },
}
