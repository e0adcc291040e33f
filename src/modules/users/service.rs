use chrono::{Duration, Utc};
use rand::RngCore;
use tracing::{debug, instrument};

use crate::modules::auth::model::RegisterRequest;
use crate::store::UserStore;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{NewUser, Role, User, UserRecord};

/// Verification links are valid this long after issuance.
const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

const INVALID_LINK: &str = "Invalid verification link";
const EXPIRED_LINK: &str = "Verification link has expired";

/// Generates an opaque verification token: 32 random bytes, hex-encoded.
fn generate_verification_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub struct UserService;

impl UserService {
    /// Registers a new account and issues its verification token.
    ///
    /// Returns the stored record together with the plaintext token so the
    /// caller can hand it to the mailer.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register(
        store: &dyn UserStore,
        dto: RegisterRequest,
    ) -> Result<(UserRecord, String), AppError> {
        if store.email_exists(&dto.email).await? {
            return Err(AppError::bad_request("Email already registered"));
        }

        let password_hash = hash_password(&dto.password)?;
        let token = generate_verification_token();

        let user = store
            .insert(NewUser {
                full_name: dto.full_name,
                email: dto.email,
                country: dto.country,
                date_of_birth: dto.date_of_birth,
                password_hash,
                role: Role::User,
                verified: false,
                verification_token: Some(token.clone()),
                verification_expires: Some(
                    Utc::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS),
                ),
            })
            .await?;

        Ok((user, token))
    }

    /// Consumes a verification token: marks the owning record verified and
    /// clears the token so it cannot be replayed.
    ///
    /// An expired token is rejected but left in place; only successful
    /// consumption (or a reissue) replaces it.
    #[instrument(skip(store, token))]
    pub async fn consume_verification_token(
        store: &dyn UserStore,
        token: &str,
    ) -> Result<UserRecord, AppError> {
        let Some(user) = store.find_by_verification_token(token).await? else {
            return Err(AppError::bad_request(INVALID_LINK));
        };

        let Some(expires) = user.verification_expires else {
            return Err(AppError::bad_request(INVALID_LINK));
        };

        if Utc::now() >= expires {
            debug!(email = %user.email, "verification token expired");
            return Err(AppError::bad_request(EXPIRED_LINK));
        }

        // Compare-and-clear in the store: if a concurrent consumer already
        // cleared the token, this request loses and sees an invalid link.
        if !store.mark_verified(user.id, token).await? {
            return Err(AppError::bad_request(INVALID_LINK));
        }

        Ok(user)
    }

    /// Replaces the verification token on an unverified account.
    ///
    /// Returns `None` when no unverified account exists for the email; the
    /// caller responds generically either way so addresses cannot be probed.
    #[instrument(skip(store))]
    pub async fn reissue_verification_token(
        store: &dyn UserStore,
        email: &str,
    ) -> Result<Option<(UserRecord, String)>, AppError> {
        let Some(user) = store.find_by_email(email).await? else {
            return Ok(None);
        };

        if user.verified {
            return Ok(None);
        }

        let token = generate_verification_token();
        store
            .set_verification_token(
                user.id,
                &token,
                Utc::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS),
            )
            .await?;

        Ok(Some((user, token)))
    }

    /// Public view of the account behind an authenticated identity.
    pub async fn get_by_email(store: &dyn UserStore, email: &str) -> Result<User, AppError> {
        let user = store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user.into_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryUserStore;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
            full_name: "Test Reader".to_string(),
            country: Some("ES".to_string()),
            date_of_birth: None,
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password_and_token() {
        let store = MemoryUserStore::new();

        let (user, token) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        assert_eq!(token.len(), 64); // 32 bytes hex-encoded
        assert!(!user.verified);
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "hunter2hunter2");
        assert_eq!(user.verification_token.as_deref(), Some(token.as_str()));
        assert!(user.verification_expires.is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        let err = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn test_verification_token_is_single_use() {
        let store = MemoryUserStore::new();
        let (_, token) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        let verified = UserService::consume_verification_token(&store, &token)
            .await
            .unwrap();
        assert_eq!(verified.email, "a@b.com");

        let record = store.record("a@b.com").unwrap();
        assert!(record.verified);
        assert!(record.verification_token.is_none());
        assert!(record.verification_expires.is_none());

        // Replay must fail as an unknown token, not an expired one.
        let err = UserService::consume_verification_token(&store, &token)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_LINK);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_but_left_in_place() {
        let store = MemoryUserStore::new();
        let (_, token) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        store.set_verification_expiry("a@b.com", Some(Utc::now() - Duration::seconds(1)));

        let err = UserService::consume_verification_token(&store, &token)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), EXPIRED_LINK);

        // Expiry does not clear the token.
        let record = store.record("a@b.com").unwrap();
        assert_eq!(record.verification_token.as_deref(), Some(token.as_str()));
        assert!(!record.verified);
    }

    #[tokio::test]
    async fn test_token_valid_just_inside_window() {
        let store = MemoryUserStore::new();
        let (_, token) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        // One minute left on the 24h window.
        store.set_verification_expiry("a@b.com", Some(Utc::now() + Duration::minutes(1)));

        assert!(
            UserService::consume_verification_token(&store, &token)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_reissue_replaces_token_for_unverified_account() {
        let store = MemoryUserStore::new();
        let (_, first) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();

        let (_, second) = UserService::reissue_verification_token(&store, "a@b.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(first, second);

        // The old link is dead, the new one works.
        assert!(
            UserService::consume_verification_token(&store, &first)
                .await
                .is_err()
        );
        assert!(
            UserService::consume_verification_token(&store, &second)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_reissue_is_silent_for_unknown_or_verified_accounts() {
        let store = MemoryUserStore::new();

        assert!(
            UserService::reissue_verification_token(&store, "nobody@b.com")
                .await
                .unwrap()
                .is_none()
        );

        let (_, token) = UserService::register(&store, register_request("a@b.com"))
            .await
            .unwrap();
        UserService::consume_verification_token(&store, &token)
            .await
            .unwrap();

        assert!(
            UserService::reissue_verification_token(&store, "a@b.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
