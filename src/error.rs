//! Common error type shared by the provider clients and the HTTP surface.
//!
//! Every failure propagates straight to the caller; nothing is retried or
//! recovered internally. `IntoResponse` maps each variant to the HTTP status
//! the route contract promises.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required query parameter '{0}'")]
    MissingParam(&'static str),
    #[error("{0} API key is not configured")]
    MissingApiKey(&'static str),
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),
    #[error("openai: {0}")]
    OpenAi(String),
    #[error("fal: {0}")]
    Fal(String),
    #[error("queued request {0} did not complete within {1}s")]
    QueueTimeout(String, u64),
    #[error("provider returned an empty image list")]
    EmptyImageBatch,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParam(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) | AppError::OpenAi(_) | AppError::Fal(_) => StatusCode::BAD_GATEWAY,
            AppError::QueueTimeout(_, _) => StatusCode::GATEWAY_TIMEOUT,
            AppError::EmptyImageBatch => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
