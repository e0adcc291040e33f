//! Request-processing middleware.
//!
//! # Authentication and authorization flow
//!
//! 1. [`authn::authenticate`] reads the `Authorization: Bearer` header and
//!    attaches an [`authn::AuthContext`] to the request — anonymous when the
//!    header is absent or the token fails validation.
//! 2. [`authz::authorize`] evaluates the static route policy against the
//!    context and rejects with 401/403 where required.
//! 3. Handlers read the identity through the [`authn::AuthUser`] extractor.

pub mod authn;
pub mod authz;
