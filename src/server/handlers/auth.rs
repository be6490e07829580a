//! Admin login

use crate::core::error::{RequestError, RestroError, RestroResult};
use crate::core::password::verify_password;
use crate::core::validation::ValidatedJson;
use crate::entities::LoginRequest;
use crate::server::host::ServerHost;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

fn invalid(message: &str) -> RestroError {
    RequestError::InvalidCredentials {
        message: message.to_string(),
    }
    .into()
}

/// `POST /auth/login`
///
/// Answers `{ "token": ... }`, a JWT carrying the user's ID. Unknown users and
/// wrong passwords are told apart, both with status 400.
pub async fn login(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> RestroResult<impl IntoResponse> {
    let tokens = host
        .tokens
        .as_ref()
        .ok_or_else(|| RestroError::internal("login is not configured on this server"))?;

    let Some(user) = host.users.find_by_username(request.username.trim()).await? else {
        tracing::info!(username = %request.username.trim(), "login with unknown username");
        return Err(invalid("Invalid username"));
    };

    let matches = verify_password(&request.password, &user.password_hash)
        .await
        .map_err(RestroError::internal)?;
    if !matches {
        tracing::info!(username = %user.username, "login with wrong password");
        return Err(invalid("Invalid password"));
    }

    let token = tokens
        .issue(&user.id.to_string())
        .map_err(RestroError::internal)?;
    tracing::info!(username = %user.username, "admin logged in");
    Ok(Json(json!({ "token": token })))
}
