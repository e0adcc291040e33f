//! Route authorization policy.
//!
//! A static ordered table maps URL path prefixes to the access level they
//! require. [`decide`] is a pure function over (path, method, identity);
//! [`authorize`] applies it to the [`AuthContext`] left by the
//! authentication middleware and turns a deny into the 401/403 response.

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::middleware::authn::AuthContext;
use crate::modules::auth::model::Identity;
use crate::utils::errors::AppError;

/// Access level a route subtree requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable by anyone, identity or not.
    Public,
    /// Requires any authenticated identity.
    Authenticated,
    /// Requires an authenticated identity with the admin role.
    Admin,
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEntry {
    /// Path prefix; matches the path itself and everything below it.
    pub prefix: &'static str,
    /// Methods this entry applies to; `None` matches every method.
    pub methods: Option<&'static [Method]>,
    pub access: Access,
}

const READ_METHODS: &[Method] = &[Method::GET, Method::HEAD];

/// The route policy, evaluated top-down: the first matching entry wins, so
/// more specific prefixes must precede broader ones. Book routes are public
/// for reads only; writes fall through to the authenticated default.
pub static POLICY: &[PolicyEntry] = &[
    PolicyEntry {
        prefix: "/auth",
        methods: None,
        access: Access::Public,
    },
    PolicyEntry {
        prefix: "/api/auth",
        methods: None,
        access: Access::Public,
    },
    PolicyEntry {
        prefix: "/api/books",
        methods: Some(READ_METHODS),
        access: Access::Public,
    },
    PolicyEntry {
        prefix: "/api/categories",
        methods: None,
        access: Access::Public,
    },
    PolicyEntry {
        prefix: "/api/admin",
        methods: None,
        access: Access::Admin,
    },
];

/// Requirement for any path no table entry matches.
const DEFAULT_ACCESS: Access = Access::Authenticated;

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny {
        status: StatusCode,
        reason: &'static str,
    },
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    path == prefix
        || (path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
}

fn required_access(path: &str, method: &Method) -> Access {
    POLICY
        .iter()
        .find(|entry| {
            prefix_matches(entry.prefix, path)
                && entry.methods.is_none_or(|methods| methods.contains(method))
        })
        .map(|entry| entry.access)
        .unwrap_or(DEFAULT_ACCESS)
}

/// Decides whether `identity` may reach `path` with `method`.
pub fn decide(path: &str, method: &Method, identity: Option<&Identity>) -> Decision {
    match required_access(path, method) {
        Access::Public => Decision::Allow,
        Access::Authenticated => match identity {
            Some(_) => Decision::Allow,
            None => Decision::Deny {
                status: StatusCode::UNAUTHORIZED,
                reason: "Authentication required",
            },
        },
        Access::Admin => match identity {
            Some(identity) if identity.role.is_admin() => Decision::Allow,
            Some(_) => Decision::Deny {
                status: StatusCode::FORBIDDEN,
                reason: "Administrator access required",
            },
            None => Decision::Deny {
                status: StatusCode::UNAUTHORIZED,
                reason: "Authentication required",
            },
        },
    }
}

/// Middleware enforcing the policy table.
///
/// Must run after [`authenticate`](crate::middleware::authn::authenticate);
/// a request that skipped authentication is treated as anonymous.
pub async fn authorize(req: Request, next: Next) -> Response {
    let identity = req
        .extensions()
        .get::<AuthContext>()
        .and_then(AuthContext::identity)
        .cloned();

    match decide(req.uri().path(), req.method(), identity.as_ref()) {
        Decision::Allow => next.run(req).await,
        Decision::Deny { status, reason } => {
            debug!(
                path = %req.uri().path(),
                method = %req.method(),
                status = %status.as_u16(),
                "request denied by route policy"
            );
            let err = if status == StatusCode::FORBIDDEN {
                AppError::forbidden(reason)
            } else {
                AppError::unauthorized(reason)
            };
            err.into_response()
        }
    }
}
