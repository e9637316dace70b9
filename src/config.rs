use std::env;

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub provider: String,
    pub api_key: String,
    pub username: String,
    pub from: String,
}

/// Read once at startup and handed to the services by value; nothing below
/// the handlers touches the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub dev_mode: bool,
    pub port: u16,
    pub host: String,
    pub sms: SmsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiry_days: env::var("JWT_EXPIRY_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("JWT_EXPIRY_DAYS must be a number"),
            dev_mode: matches!(env::var("DEV_MODE").as_deref(), Ok("true") | Ok("1")),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            sms: SmsConfig {
                provider: env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
                api_key: env::var("SMS_API_KEY").unwrap_or_default(),
                username: env::var("SMS_USERNAME").unwrap_or_else(|_| "sandbox".to_string()),
                from: env::var("SMS_FROM").unwrap_or_else(|_| "VASTRA".to_string()),
            },
        }
    }
}
