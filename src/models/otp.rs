use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_otp_code, validate_phone};

/// A stored one-time code. Consumed rows are kept (with `is_used = true`)
/// rather than deleted, so verification history survives until the next
/// code replaces them.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct OtpVerification {
    pub id: i64,
    pub phone: String,
    pub otp: String,
    pub is_used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(
        length(min = 6, max = 6, message = "OTP must be 6 digits"),
        custom(function = "validate_otp_code")
    )]
    pub otp: String,
}

/// `otp` is echoed back only when the server runs in dev mode.
#[derive(Debug, Serialize)]
pub struct SendOtpData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_request_checks_code_shape() {
        let ok = VerifyOtpRequest {
            phone: "+919999999999".to_string(),
            otp: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = VerifyOtpRequest {
            phone: "+919999999999".to_string(),
            otp: "12345".to_string(),
        };
        assert!(short.validate().is_err());

        let alpha = VerifyOtpRequest {
            phone: "+919999999999".to_string(),
            otp: "12345a".to_string(),
        };
        assert!(alpha.validate().is_err());
    }

    #[test]
    fn send_request_checks_phone() {
        let bad = SendOtpRequest {
            phone: "not-a-phone".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn dev_code_is_omitted_from_json_when_absent() {
        let data = SendOtpData {
            message: "OTP sent successfully".to_string(),
            otp: None,
        };
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("otp").is_none());
        assert_eq!(value["message"], "OTP sent successfully");
    }
}
