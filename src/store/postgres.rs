//! Postgres-backed user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::{NewUser, UserRecord};
use crate::utils::errors::AppError;

use super::UserStore;

const USER_COLUMNS: &str = "id, full_name, email, country, date_of_birth, password_hash, \
     role, verified, verification_token, verification_expires, created_at";

/// User store on top of a sqlx Postgres pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let inserted = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (full_name, email, country, date_of_birth, password_hash, \
             role, verified, verification_token, verification_expires) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.country)
        .bind(user.date_of_birth)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.verified)
        .bind(&user.verification_token)
        .bind(user.verification_expires)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE verification_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid, token: &str) -> Result<bool, AppError> {
        // Single UPDATE keyed on the token value: of two concurrent
        // consumers, exactly one sees a matching row.
        let result = sqlx::query(
            "UPDATE users \
             SET verified = TRUE, verification_token = NULL, verification_expires = NULL \
             WHERE id = $1 AND verification_token = $2",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users \
             SET verification_token = $2, verification_expires = $3 \
             WHERE id = $1 AND verified = FALSE",
        )
        .bind(id)
        .bind(token)
        .bind(expires)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
