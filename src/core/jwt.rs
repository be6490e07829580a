//! Signed admin sessions
//!
//! `POST /auth/login` hands out an HS256 token carrying the user's ID; admin
//! routes accept it through [`JwtAuthProvider`] until it expires.

use crate::core::auth::{AuthContext, AuthProvider, TOKEN_INVALID, bearer_token};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Lifetime of a login token unless configured otherwise
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 4;

/// Payload of an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub iat: u64,
    pub exp: u64,
}

/// Issues and verifies admin tokens signed with a shared secret
pub struct JwtAuthProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAuthProvider {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `user_id`, valid from now for the configured lifetime
    pub fn issue(&self, user_id: &str) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let iat = u64::try_from(issued_at.timestamp()).map_err(|e| anyhow!(e))?;
        let exp = u64::try_from((issued_at + self.ttl).timestamp()).map_err(|e| anyhow!(e))?;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| anyhow!("Failed to sign token: {}", e))
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| anyhow!("{}: {}", TOKEN_INVALID, e))
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let Some(token) = bearer_token(headers) else {
            return Ok(AuthContext::Anonymous);
        };

        let claims = self.verify(token)?;
        Ok(AuthContext::Admin {
            subject: claims.user_id,
        })
    }
}
