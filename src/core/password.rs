//! bcrypt password hashing, run off the async runtime

use anyhow::{Result, anyhow};

/// Work factor used for new admin passwords
pub const DEFAULT_PASSWORD_COST: u32 = 10;

pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| anyhow!("Password hashing task failed: {}", e))?
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Check a password against a stored bcrypt hash
///
/// A malformed hash is an error, a wrong password is `Ok(false)`.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| anyhow!("Password check task failed: {}", e))?
        .map_err(|e| anyhow!("Failed to verify password: {}", e))
}
