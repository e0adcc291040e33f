//! User data models.
//!
//! [`User`] is the public representation returned by the API. [`UserRecord`]
//! is the full row owned by the user store, including credential and
//! verification fields, and is never serialized to clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Access role of an account. The system has exactly two.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookstore account as returned by the API.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub country: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Full user row as owned by the user store.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub country: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    pub verification_token: Option<String>,
    pub verification_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strips credential and verification material for client responses.
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            country: self.country,
            date_of_birth: self.date_of_birth,
            role: self.role,
            verified: self.verified,
            created_at: self.created_at,
        }
    }
}

/// Insert payload handed to the user store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub country: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    pub verification_token: Option<String>,
    pub verification_expires: Option<DateTime<Utc>>,
}
