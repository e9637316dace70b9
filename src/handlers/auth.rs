use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::otp::{SendOtpData, SendOtpRequest, VerifyOtpRequest};
use crate::models::user::{AuthResponse, Claims, CompleteProfileRequest, UserResponse};
use crate::response;
use crate::state::AppState;

/// POST /api/auth/send-otp
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return response::validation_error(&errors);
    }

    let verification = match state.otp_service.issue(&req.phone).await {
        Ok(verification) => verification,
        Err(e) => {
            tracing::error!("Send OTP error: {}", e);
            return response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send OTP");
        }
    };

    // Delivery failure does not invalidate the stored code; the client can
    // retry send-otp, which replaces it.
    if let Err(e) = state
        .sms_service
        .send_otp(&req.phone, &verification.otp)
        .await
    {
        tracing::error!("Failed to send SMS: {}", e);
    }

    tracing::info!("OTP sent to {}", req.phone);

    let data = SendOtpData {
        message: "OTP sent successfully".to_string(),
        otp: state.config.dev_mode.then(|| verification.otp.clone()),
    };
    response::success(data, "Success")
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return response::validation_error(&errors);
    }

    match state.otp_service.consume(&req.phone, &req.otp).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return response::error(StatusCode::BAD_REQUEST, "Invalid or expired OTP");
        }
        Err(e) => {
            tracing::error!("Verify OTP error: {}", e);
            return response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify OTP");
        }
    }

    let (user, is_new_user) = match state.user_service.resolve_on_verification(&req.phone).await {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("Verify OTP error: {}", e);
            return response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify OTP");
        }
    };

    if is_new_user {
        tracing::info!("New user created: {}", req.phone);
    } else {
        tracing::info!("User logged in: {}", req.phone);
    }

    let token = match state.token_service.issue(&user) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Token generation error: {}", e);
            return response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify OTP");
        }
    };

    let data = AuthResponse {
        token,
        user: UserResponse::summary(&user),
        is_new_user,
    };
    response::success(data, "OTP verified successfully")
}

/// POST /api/auth/complete-profile
pub async fn complete_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CompleteProfileRequest>,
) -> Result<Response> {
    if let Err(errors) = req.validate() {
        return Ok(response::validation_error(&errors));
    }

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;
    let birth_date = NaiveDate::parse_from_str(&req.birth_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid birth date".to_string()))?;

    let user = state
        .user_service
        .complete_profile(user_id, req.name.trim(), birth_date, &req.gender)
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!("Profile completed for user: {}", user.id);

    Ok(response::success(
        json!({ "user": UserResponse::summary(&user) }),
        "Profile completed successfully",
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

    let user = state
        .user_service
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(response::success(
        json!({ "user": UserResponse::with_created_at(&user) }),
        "Success",
    ))
}
