//! Router setup and shared application state.
//!
//! API routes are registered before the static fallback so `/api/*` always
//! wins; any other path is resolved against the public directory.
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::fal::client::FalClient;
use crate::openai::client::OpenAiClient;

/// Provider clients shared by every request. Constructed once at startup from
/// an explicit [`Config`](crate::Config); no process-global client state.
pub struct AppState {
    pub openai: OpenAiClient,
    pub fal: FalClient,
}

pub fn app(state: Arc<AppState>, public_dir: &str) -> Router {
    Router::new()
        .route("/api/gpt", get(handlers::gpt))
        .route("/api/dalle", get(handlers::dalle))
        .route("/api/fal", get(handlers::fal))
        .route("/api/falfast", get(handlers::falfast))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
