//! Route-boundary error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::core::gateway::AnalysisError;

/// Every failure at a route boundary becomes `400 {"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Body(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "Request rejected");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}
