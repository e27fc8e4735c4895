//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::error::HubError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub HubError);

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Use external_message() to avoid exposing upstream URLs and parser output.
        // Full error details are logged separately for debugging
        let status = match &self.0 {
            HubError::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            HubError::EndpointUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HubError::Fetch(_) => StatusCode::BAD_GATEWAY,
            HubError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            HubError::Config(_) | HubError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self.0, status = %status, "Request failed");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
