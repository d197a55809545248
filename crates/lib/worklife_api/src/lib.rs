//! # worklife_api
//!
//! HTTP API library for the work-life balance agent.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use worklife_core::pipeline::Analyzer;

use crate::config::ApiConfig;
use crate::handlers::{analyze, health};

pub const ROUTE_HEALTH: &str = "/health";
pub const ROUTE_ANALYZE: &str = "/analyze";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline holding the process-wide completion client.
    pub analyzer: Analyzer,
    /// API configuration.
    pub config: ApiConfig,
}

/// Credentialed CORS for the configured origins.
///
/// Methods and headers are mirrored from the preflight request, since
/// wildcards are not allowed together with credentials.
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route(ROUTE_HEALTH, get(health::health_check))
        .route(ROUTE_ANALYZE, post(analyze::analyze_handler))
        .layer(cors)
        .with_state(state)
}
