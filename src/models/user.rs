use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_gender, validate_name};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape for the `user` object in responses. `createdAt` is only
/// included by the current-user endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    pub fn summary(user: &User) -> Self {
        UserResponse {
            id: user.id,
            phone: user.phone.clone(),
            name: user.name.clone(),
            birth_date: user.birth_date,
            gender: user.gender.clone(),
            is_verified: user.is_verified,
            created_at: None,
        }
    }

    pub fn with_created_at(user: &User) -> Self {
        UserResponse {
            created_at: Some(user.created_at),
            ..Self::summary(user)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
    pub is_new_user: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub phone: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    pub birth_date: String,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
}
