use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::user::User;

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

fn is_unique_violation(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation()
    )
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    /// Map a freshly verified phone to its account, creating one if needed.
    /// Returns the account and whether this call created it.
    ///
    /// When two first-time verifications race, the unique key on `phone`
    /// lets exactly one insert win; the loser sees the constraint violation
    /// and falls back to the update path, so `is_new_user` stays truthful.
    pub async fn resolve_on_verification(&self, phone: &str) -> Result<(User, bool)> {
        if self.find_by_phone(phone).await?.is_some() {
            let user = self.mark_verified(phone).await?;
            return Ok((user, false));
        }

        match self.insert_verified(phone).await {
            Ok(user) => Ok((user, true)),
            Err(e) if is_unique_violation(&e) => {
                let user = self.mark_verified(phone).await?;
                Ok((user, false))
            }
            Err(e) => Err(e),
        }
    }

    async fn mark_verified(&self, phone: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET is_verified = TRUE, updated_at = NOW()
             WHERE phone = $1
             RETURNING *",
        )
        .bind(phone)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert_verified(&self, phone: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, phone, is_verified)
             VALUES ($1, $2, TRUE)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(phone)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    /// Overwrite the three profile fields. Returns `None` when the account
    /// no longer exists.
    pub async fn complete_profile(
        &self,
        id: Uuid,
        name: &str,
        birth_date: NaiveDate,
        gender: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET name = $2, birth_date = $3, gender = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(birth_date)
        .bind(gender)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> PgPool {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("TEST_DATABASE_URL or DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.expect("failed to connect");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations failed");
        pool
    }

    async fn clear_phone(pool: &PgPool, phone: &str) {
        sqlx::query("DELETE FROM users WHERE phone = $1")
            .bind(phone)
            .execute(pool)
            .await
            .expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore] // Requires a running Postgres
    async fn first_verification_creates_the_account() {
        let pool = test_pool().await;
        let phone = "+919800000011";
        clear_phone(&pool, phone).await;
        let service = UserService::new(pool);

        let (user, is_new_user) = service.resolve_on_verification(phone).await.unwrap();
        assert!(is_new_user);
        assert!(user.is_verified);
        assert_eq!(user.phone, phone);
        assert!(user.name.is_none());
        assert!(user.birth_date.is_none());
        assert!(user.gender.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires a running Postgres
    async fn repeat_verification_reuses_the_account() {
        let pool = test_pool().await;
        let phone = "+919800000012";
        clear_phone(&pool, phone).await;
        let service = UserService::new(pool);

        let (first, _) = service.resolve_on_verification(phone).await.unwrap();
        let (second, is_new_user) = service.resolve_on_verification(phone).await.unwrap();

        assert!(!is_new_user);
        assert_eq!(first.id, second.id);
        assert!(second.is_verified);
    }

    #[tokio::test]
    #[ignore] // Requires a running Postgres
    async fn concurrent_first_verifications_create_one_account() {
        let pool = test_pool().await;
        let phone = "+919800000013";
        clear_phone(&pool, phone).await;
        let service = UserService::new(pool.clone());

        let (a, b) = tokio::join!(
            service.resolve_on_verification(phone),
            service.resolve_on_verification(phone)
        );
        let (user_a, _) = a.unwrap();
        let (user_b, _) = b.unwrap();
        assert_eq!(user_a.id, user_b.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    #[ignore] // Requires a running Postgres
    async fn complete_profile_overwrites_and_is_idempotent() {
        let pool = test_pool().await;
        let phone = "+919800000014";
        clear_phone(&pool, phone).await;
        let service = UserService::new(pool);

        let (user, _) = service.resolve_on_verification(phone).await.unwrap();
        let birth_date = NaiveDate::from_ymd_opt(1995, 4, 12).unwrap();

        let updated = service
            .complete_profile(user.id, "Asha Rao", birth_date, "female")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(updated.name.as_deref(), Some("Asha Rao"));
        assert_eq!(updated.birth_date, Some(birth_date));
        assert_eq!(updated.gender.as_deref(), Some("female"));

        let again = service
            .complete_profile(user.id, "Asha Rao", birth_date, "female")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(again.name, updated.name);
        assert_eq!(again.birth_date, updated.birth_date);
        assert_eq!(again.gender, updated.gender);
    }

    #[tokio::test]
    #[ignore] // Requires a running Postgres
    async fn complete_profile_reports_missing_user() {
        let pool = test_pool().await;
        let service = UserService::new(pool);

        let missing = service
            .complete_profile(
                Uuid::new_v4(),
                "Asha Rao",
                NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
                "female",
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
