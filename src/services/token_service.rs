use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::Result;
use crate::models::user::{Claims, User};

/// Issues and verifies the HS256 session tokens handed out after a
/// successful OTP verification.
#[derive(Clone)]
pub struct TokenService {
    jwt_secret: String,
    expiry_days: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String, expiry_days: i64) -> Self {
        Self {
            jwt_secret,
            expiry_days,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let expiration = Utc::now() + Duration::days(self.expiry_days);
        let claims = Claims {
            sub: user.id.to_string(),
            phone: user.phone.clone(),
            exp: expiration.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
