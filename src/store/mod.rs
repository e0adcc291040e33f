//! User store collaborator interface.
//!
//! The core never owns user persistence; it talks to a [`UserStore`] that
//! resolves credential records and holds verification-token state. The
//! production implementation is [`postgres::PgUserStore`]; an in-memory
//! implementation is available behind the `test-utils` feature for
//! integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::users::model::{NewUser, UserRecord};
use crate::utils::errors::AppError;

pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

/// External user-record store consumed by the auth layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a credential record by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Returns whether an account already exists for this email.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Inserts a new user record and returns the stored row.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError>;

    /// Looks up the record currently holding this verification token.
    async fn find_by_verification_token(&self, token: &str)
    -> Result<Option<UserRecord>, AppError>;

    /// Atomically marks the record verified and clears its verification
    /// token and expiry, but only while the record still holds `token`.
    ///
    /// Returns `false` when no row matched, which is how a concurrent
    /// consumer that won the race is observed.
    async fn mark_verified(&self, id: Uuid, token: &str) -> Result<bool, AppError>;

    /// Replaces the verification token and expiry on an unverified record.
    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError>;
}
