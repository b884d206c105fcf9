//! Axum request handlers for the HTTP API.
//!
//! Each handler reads the `prompt` query parameter, shapes it, calls the
//! matching provider client, and writes the provider's result back as the
//! response body. Errors map to statuses in [`crate::error::AppError`].
use axum::extract::{Query, State};
use axum::Json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::fal::models::{
    LightningSdxlInput, StableCascadeInput, FAST_LIGHTNING_SDXL, STABLE_CASCADE,
};
use crate::openai::models::ImageGenerationResponse;
use crate::prompt::template::{machine_analysis, truncate_prompt, ANALYSIS_TEMPERATURE};

/// Require a non-blank `prompt` query parameter.
fn require_prompt(params: &HashMap<String, String>) -> AppResult<&str> {
    params
        .get("prompt")
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingParam("prompt"))
}

pub async fn gpt(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<String> {
    let prompt = require_prompt(&params)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, route = "gpt", prompt = %prompt, "Request received");

    let analysis = machine_analysis(prompt);
    state.openai.complete(&analysis, ANALYSIS_TEMPERATURE).await
}

pub async fn dalle(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ImageGenerationResponse>> {
    let prompt = require_prompt(&params)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, route = "dalle", prompt = %prompt, "Request received");

    let short_prompt = truncate_prompt(prompt);
    state.openai.generate_image(short_prompt).await.map(Json)
}

pub async fn fal(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<String> {
    let prompt = require_prompt(&params)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, route = "fal", prompt = %prompt, "Request received");

    let input = StableCascadeInput::new(truncate_prompt(prompt));
    let result = state.fal.subscribe(STABLE_CASCADE, &input).await?;
    result
        .first_url()
        .map(|url| url.to_string())
        .ok_or(AppError::EmptyImageBatch)
}

pub async fn falfast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<String> {
    let prompt = require_prompt(&params)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, route = "falfast", prompt = %prompt, "Request received");

    let input = LightningSdxlInput::new(truncate_prompt(prompt));
    let result = state.fal.subscribe(FAST_LIGHTNING_SDXL, &input).await?;
    result
        .first_url()
        .map(|url| url.to_string())
        .ok_or(AppError::EmptyImageBatch)
}
