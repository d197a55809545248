//! Analysis endpoint — runs the latest user message through the pipeline.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{AgentRequest, AgentResponse};

pub const NO_USER_MESSAGE: &str = "No user message found in request.";

/// `POST /analyze` — analyze the latest `user` turn of a chat transcript.
///
/// A well-formed request always gets HTTP 200; a missing user turn or a failed
/// completion call is reported through `status: "error"` in the envelope.
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> AppResult<Json<AgentResponse>> {
    let Json(request) = payload?;

    let Some(message) = request.latest_user_message() else {
        warn!(turns = request.messages.len(), "analyze request without a user turn");
        return Ok(Json(AgentResponse::error(NO_USER_MESSAGE)));
    };

    info!(turns = request.messages.len(), chars = message.len(), "analyzing user message");

    match state.analyzer.analyze(message).await {
        Ok(record) => Ok(Json(AgentResponse::success(record))),
        Err(e) => {
            error!(error = %e, "analysis failed");
            Ok(Json(AgentResponse::error(e.to_string())))
        }
    }
}
