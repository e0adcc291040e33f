//! Request authentication middleware.
//!
//! Runs on every inbound request. It reads the `Authorization: Bearer`
//! header if present, validates the session token, and attaches an
//! [`AuthContext`] to the request extensions. It never rejects a request:
//! a missing or invalid token degrades to [`AuthContext::Anonymous`], and
//! the authorization policy downstream is the single place that turns a
//! missing identity into a 401/403.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::modules::auth::model::Identity;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::validate_session_token;

/// Authentication outcome for one request.
///
/// Created fresh by [`authenticate`] per request and dropped with it; the
/// identity never outlives or leaks across requests.
#[derive(Debug, Clone)]
pub enum AuthContext {
    Authenticated(Identity),
    Anonymous,
}

impl AuthContext {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthContext::Authenticated(identity) => Some(identity),
            AuthContext::Anonymous => None,
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Middleware resolving the caller's identity for the rest of the request.
///
/// Token validation failures are swallowed here on purpose: the request
/// continues as anonymous and only the authorization policy decides whether
/// that is acceptable for the route.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let context = match bearer_token(req.headers()) {
        None => AuthContext::Anonymous,
        Some(token) => match validate_session_token(token, &state.jwt_config) {
            Ok(identity) => AuthContext::Authenticated(identity),
            Err(err) => {
                debug!(%err, "rejected bearer token, continuing as anonymous");
                AuthContext::Anonymous
            }
        },
    };

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Extractor handing handlers the authenticated caller's identity.
///
/// This is the read-only accessor business handlers use to learn who is
/// calling without re-validating tokens. Rejects with 401 when the request
/// is anonymous; routes behind the policy's authenticated tiers never see
/// that rejection in practice.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::Authenticated(identity)) => Ok(AuthUser(identity.clone())),
            _ => Err(AppError::unauthorized("Authentication required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::Role;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        // Scheme is case-sensitive, matching the header the storefront sends.
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_context_identity_accessor() {
        let identity = Identity {
            subject: "reader@example.com".to_string(),
            role: Role::User,
        };
        let ctx = AuthContext::Authenticated(identity.clone());
        assert_eq!(ctx.identity(), Some(&identity));
        assert_eq!(AuthContext::Anonymous.identity(), None);
    }
}
