use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("SMS error: {0}")]
    Sms(String),

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Infrastructure detail stays in the logs; callers get an opaque
        // message.
        let (status, message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Jwt(e) => {
                tracing::error!("Token error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Sms(e) => {
                tracing::error!("SMS error: {}", e);
                (StatusCode::BAD_GATEWAY, "Failed to send OTP")
            }
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized access"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
        };

        response::error(status, message)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
