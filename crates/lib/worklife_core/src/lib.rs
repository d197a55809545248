//! # worklife_core
//!
//! Core analysis pipeline for the work-life balance agent.
//!
//! A user message is wrapped in a fixed instruction prompt, sent to a remote
//! chat-completion model, and the model's free text is normalized into an
//! Analysis Record mapping.

pub mod analysis;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod prompt;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
