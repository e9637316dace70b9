use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;

use crate::errors::Result;
use crate::models::otp::OtpVerification;

pub const OTP_VALIDITY_MINUTES: i64 = 10;

#[derive(Clone)]
pub struct OtpService {
    db: PgPool,
}

impl OtpService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Generate a 6-digit OTP in the range 100000-999999.
    pub fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(100_000..1_000_000).to_string()
    }

    /// Store a fresh code for the phone. Any previous codes for the phone
    /// are deleted in the same transaction, so at most one redeemable code
    /// exists per phone at any time.
    pub async fn issue(&self, phone: &str) -> Result<OtpVerification> {
        let otp = Self::generate_otp();
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM otp_verifications WHERE phone = $1")
            .bind(phone)
            .execute(&mut *tx)
            .await?;

        let verification = sqlx::query_as::<_, OtpVerification>(
            "INSERT INTO otp_verifications (phone, otp, expires_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(phone)
        .bind(&otp)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(verification)
    }

    /// Mark a matching, unused, unexpired code as used and return it. The
    /// single UPDATE is the atomicity boundary: two concurrent calls with
    /// the same code race on the row lock and exactly one sees
    /// `is_used = FALSE`. Returns `None` for wrong, expired, consumed, or
    /// never-issued codes alike.
    pub async fn consume(&self, phone: &str, otp: &str) -> Result<Option<OtpVerification>> {
        let verification = sqlx::query_as::<_, OtpVerification>(
            "UPDATE otp_verifications
             SET is_used = TRUE
             WHERE phone = $1 AND otp = $2 AND is_used = FALSE AND expires_at > NOW()
             RETURNING *",
        )
        .bind(phone)
        .bind(otp)
        .fetch_optional(&self.db)
        .await?;

        Ok(verification)
    }
}
