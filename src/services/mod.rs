pub mod otp_service;
pub mod sms_service;
pub mod token_service;
pub mod user_service;
