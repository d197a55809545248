//! Analysis pipeline: prompt invoker followed by response normalizer.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::analysis::check_shape;
use crate::llm::{CompletionClient, LlmError};
use crate::normalize::{NormalizeMode, ParseSource, normalize_detailed};
use crate::prompt::PromptInvoker;

/// Runs one analysis per call; holds no per-request state.
#[derive(Clone)]
pub struct Analyzer {
    invoker: PromptInvoker,
    mode: NormalizeMode,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>, mode: NormalizeMode) -> Self {
        Self {
            invoker: PromptInvoker::new(client),
            mode,
        }
    }

    /// Analyze one user message.
    ///
    /// Only a failed completion call is an error; unparseable replies become
    /// the fallback record.
    pub async fn analyze(&self, user_message: &str) -> Result<Map<String, Value>, LlmError> {
        let raw = self.invoker.invoke(user_message).await?;
        let normalized = normalize_detailed(&raw, self.mode);

        match normalized.source {
            ParseSource::Fallback => {
                warn!(chars = raw.len(), "model reply was not parseable, using fallback record");
                debug!(reply = %raw, "unparseable model reply");
            }
            source => {
                info!(source = %source, "model reply parsed");
                if let Err(e) = check_shape(&normalized.record) {
                    warn!(error = %e, "passing through record with unexpected shape");
                }
            }
        }

        Ok(normalized.record)
    }
}
