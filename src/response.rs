use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use validator::ValidationErrors;

/// Envelope shared by every endpoint: `success`/`message`/`timestamp` always,
/// `data` on success, `errors` on validation failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    pub timestamp: String,
}

pub fn success<T: Serialize>(data: T, message: &str) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
        .into_response()
}

pub fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            message: message.to_string(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
        .into_response()
}

pub fn validation_error(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()> {
            success: false,
            message: "Validation failed".to_string(),
            data: None,
            errors: serde_json::to_value(errors).ok(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
        .into_response()
}
