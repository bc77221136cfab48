/**
 * Error Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers can return it
 * directly. This is the single top-level wrapper that turns every failure
 * into a JSON error body.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

/// JSON body for a status code and message
pub fn error_body(status: StatusCode, message: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "error": message,
        "status": status.as_u16(),
    }))
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!(error = %self, ?status, "Request failed");
        } else {
            tracing::debug!(error = %self, ?status, "Request rejected");
        }

        (status, error_body(status, &self.message())).into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_body(StatusCode::NOT_FOUND, "Not found"),
    )
        .into_response()
}
