//! In-memory user store for tests.
//!
//! Holds records behind a single mutex, which also gives the
//! compare-and-clear in [`mark_verified`](super::UserStore::mark_verified)
//! the same at-most-once behavior as the Postgres UPDATE.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::users::model::{NewUser, UserRecord};
use crate::utils::errors::AppError;

use super::UserStore;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: snapshot of the record for `email`, if any.
    pub fn record(&self, email: &str) -> Option<UserRecord> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Test helper: rewrites the verification expiry for `email`, e.g. to
    /// move a token into the past.
    pub fn set_verification_expiry(&self, email: &str, expires: Option<DateTime<Utc>>) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            user.verification_expires = expires;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.record(email))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.record(email).is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            country: user.country,
            date_of_birth: user.date_of_birth,
            password_hash: user.password_hash,
            role: user.role,
            verified: user.verified,
            verification_token: user.verification_token,
            verification_expires: user.verification_expires,
            created_at: Utc::now(),
        };

        self.users.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid, token: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();

        match users
            .iter_mut()
            .find(|u| u.id == id && u.verification_token.as_deref() == Some(token))
        {
            Some(user) => {
                user.verified = true;
                user.verification_token = None;
                user.verification_expires = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id && !u.verified) {
            user.verification_token = Some(token.to_string());
            user.verification_expires = Some(expires);
        }
        Ok(())
    }
}
