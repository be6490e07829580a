//! Admin users and the login payload
use crate::core::password::hash_password;
use crate::core::validation::validators::validate_not_blank;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// An account allowed to sign in to the admin routes
///
/// Only the bcrypt hash of the password is kept, stored under `password`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user, hashing `password` with the given bcrypt cost
    pub async fn with_password(username: &str, password: &str, cost: u32) -> Result<Self> {
        let password_hash = hash_password(password, cost).await?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/login`
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
