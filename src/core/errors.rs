use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the RAG pipeline.
///
/// `Config` covers missing or invalid configuration, detected when a client
/// is constructed. `Provider` covers any failure from an external call:
/// auth, rate limiting, malformed responses, connection failures, and
/// mid-stream interruptions. Neither is retried; both propagate unchanged
/// to the caller. An empty retrieval result is not an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("provider error: {0}")]
    Provider(String),
}

impl PipelineError {
    pub fn provider<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Provider(err.to_string())
    }

    pub fn missing_env(var: &str) -> Self {
        PipelineError::Config(format!("missing required environment variable: {var}"))
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            PipelineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::Provider(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
