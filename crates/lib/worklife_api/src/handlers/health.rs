//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /health` — always `{"status": "ok"}`; does not touch the model.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
