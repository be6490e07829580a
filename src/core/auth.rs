//! Authorization for admin routes
//!
//! Routes are either public or admin-only. An [`AuthProvider`] turns request
//! headers into an [`AuthContext`]; the [`require_admin`] middleware rejects
//! anything that is not an admin before the handler runs. The production
//! provider is [`JwtAuthProvider`](crate::core::jwt::JwtAuthProvider).

use crate::core::error::{RequestError, RestroError};
use anyhow::Result;
use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Message when the Authorization header is absent or not a bearer token
pub const TOKEN_REQUIRED: &str = "Unauthorized access, token required";

/// Message when a bearer token is present but rejected
pub const TOKEN_INVALID: &str = "Invalid or expired token";

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Restaurant administrator
    Admin { subject: String },

    /// No credentials presented
    Anonymous,
}

impl AuthContext {
    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Admin { .. })
    }
}

/// Authorization policy for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Admin only
    AdminOnly,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::AdminOnly => context.is_admin(),
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from request headers
    ///
    /// Absent credentials yield `Anonymous`; presented but invalid credentials
    /// are an error.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext>;
}

/// Grants admin to every request
///
/// Never installed implicitly; a server only runs open when this provider is
/// passed in on purpose, as the test suites do.
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext> {
        Ok(AuthContext::Admin {
            subject: "anonymous-admin".to_string(),
        })
    }
}

/// Read the token out of `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware guarding admin routes
pub async fn require_admin(
    State(provider): State<Arc<dyn AuthProvider>>,
    request: Request,
    next: Next,
) -> Response {
    match provider.extract_context(request.headers()).await {
        Ok(context) if AuthPolicy::AdminOnly.check(&context) => next.run(request).await,
        Ok(_) => {
            tracing::warn!(path = %request.uri().path(), "rejected request without token");
            unauthorized(TOKEN_REQUIRED)
        }
        Err(e) => {
            tracing::warn!(path = %request.uri().path(), error = %e, "rejected request token");
            unauthorized(TOKEN_INVALID)
        }
    }
}

fn unauthorized(message: &str) -> Response {
    RestroError::from(RequestError::Unauthorized {
        message: message.to_string(),
    })
    .into_response()
}
