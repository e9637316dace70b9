use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::config::SmsConfig;
use crate::errors::{AppError, Result};
use crate::services::otp_service::OTP_VALIDITY_MINUTES;

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_otp(&self, phone: &str, otp: &str) -> Result<()>;
}

fn otp_message(otp: &str) -> String {
    format!(
        "Your Vastra verification code is: {}. Valid for {} minutes.",
        otp, OTP_VALIDITY_MINUTES
    )
}

/// Logs the code instead of delivering it. Default provider for local
/// development and tests.
pub struct MockSmsSender;

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_otp(&self, phone: &str, otp: &str) -> Result<()> {
        tracing::info!("SMS to {}: {}", phone, otp_message(otp));
        Ok(())
    }
}

pub struct AfricasTalkingSender {
    api_key: String,
    username: String,
    from: String,
    client: Client,
}

impl AfricasTalkingSender {
    pub fn new(api_key: String, username: String, from: String) -> Self {
        Self {
            api_key,
            username,
            from,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SmsSender for AfricasTalkingSender {
    async fn send_otp(&self, phone: &str, otp: &str) -> Result<()> {
        let message = otp_message(otp);
        let url = "https://api.africastalking.com/version1/messaging";

        let response = self
            .client
            .post(url)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .form(&[
                ("username", self.username.as_str()),
                ("to", phone),
                ("message", message.as_str()),
                ("from", self.from.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Sms(format!("SMS API error: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Sms(format!(
                "SMS sending failed with status: {}",
                response.status()
            )))
        }
    }
}

pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsSender> {
    match config.provider.as_str() {
        "africastalking" => Arc::new(AfricasTalkingSender::new(
            config.api_key.clone(),
            config.username.clone(),
            config.from.clone(),
        )),
        "mock" => Arc::new(MockSmsSender),
        other => {
            tracing::warn!("Unknown SMS provider '{}', using mock sender", other);
            Arc::new(MockSmsSender)
        }
    }
}
