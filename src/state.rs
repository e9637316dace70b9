use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::otp_service::OtpService;
use crate::services::sms_service::{create_sms_service, SmsSender};
use crate::services::token_service::TokenService;
use crate::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub otp_service: OtpService,
    pub user_service: UserService,
    pub token_service: TokenService,
    pub sms_service: Arc<dyn SmsSender>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let sms_service = create_sms_service(&config.sms);
        let otp_service = OtpService::new(db.clone());
        let user_service = UserService::new(db.clone());
        let token_service = TokenService::new(config.jwt_secret.clone(), config.jwt_expiry_days);

        AppState {
            db,
            config: Arc::new(config),
            otp_service,
            user_service,
            token_service,
            sms_service,
        }
    }
}
