//! Session token codec.
//!
//! Session tokens are HMAC-SHA256 signed JWTs carrying the caller's email,
//! role, issued-at and expiry. Verification is stateless: there is no
//! server-side session table and no revocation before natural expiry.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, Identity};
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

/// Why a presented session token was rejected.
///
/// The signature is checked before the expiry claim, so a tampered token
/// always reports `InvalidSignature` even when its `exp` is also in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token cannot be parsed as a JWT at all.
    #[error("malformed token")]
    Malformed,
    /// The signature does not verify against the shared secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// Signature verified but `exp <= now`.
    #[error("token has expired")]
    Expired,
}

/// Signs a session token for `email` with the given role.
///
/// Claims are `{sub: email, role, iat: now, exp: now + expiry}`; the expiry
/// window comes from [`JwtConfig::session_token_expiry`] (6 hours unless
/// overridden).
pub fn issue_session_token(
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: email.to_string(),
        role,
        iat: now,
        exp: now + jwt_config.session_token_expiry as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a session token and extracts the caller's identity.
pub fn validate_session_token(token: &str, jwt_config: &JwtConfig) -> Result<Identity, TokenError> {
    let mut validation = Validation::default();
    // `exp <= now` must be rejected; the default 60s leeway would let an
    // expired token through.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| Identity {
        subject: data.claims.sub,
        role: data.claims.role,
    })
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret-key-0123456789".to_string(),
            session_token_expiry: 21600,
        }
    }

    fn issue_with_exp(email: &str, role: Role, exp: usize, config: &JwtConfig) -> String {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: email.to_string(),
            role,
            iat: now,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let config = test_config();

        let token = issue_session_token("reader@example.com", Role::User, &config).unwrap();
        let identity = validate_session_token(&token, &config).unwrap();

        assert_eq!(identity.subject, "reader@example.com");
        assert_eq!(identity.role, Role::User);

        let token = issue_session_token("admin@example.com", Role::Admin, &config).unwrap();
        let identity = validate_session_token(&token, &config).unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_expired_token_reports_expired_not_invalid_signature() {
        let config = test_config();
        let past = (Utc::now().timestamp() - 60) as usize;

        let token = issue_with_exp("reader@example.com", Role::User, past, &config);

        assert_eq!(
            validate_session_token(&token, &config),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_signature_reports_invalid_signature() {
        let config = test_config();
        let token = issue_session_token("reader@example.com", Role::User, &config).unwrap();

        // Mutate the leading character of the signature segment so the
        // decoded signature bytes are guaranteed to change.
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(
            validate_session_token(&tampered, &config),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_secret_reports_invalid_signature() {
        let config = test_config();
        let other = JwtConfig {
            secret: "a-different-secret-entirely".to_string(),
            ..test_config()
        };

        let token = issue_session_token("reader@example.com", Role::User, &other).unwrap();

        assert_eq!(
            validate_session_token(&token, &config),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_reports_malformed() {
        let config = test_config();

        assert_eq!(
            validate_session_token("definitely not a jwt", &config),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            validate_session_token("a.b.c", &config),
            Err(TokenError::Malformed)
        );
        assert_eq!(validate_session_token("", &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_expired_and_tampered_prefers_invalid_signature() {
        let config = test_config();
        let past = (Utc::now().timestamp() - 60) as usize;

        let token = issue_with_exp("reader@example.com", Role::User, past, &config);
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(
            validate_session_token(&tampered, &config),
            Err(TokenError::InvalidSignature)
        );
    }
}
