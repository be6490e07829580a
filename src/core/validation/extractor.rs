//! Axum extractor for validated request payloads
//!
//! `ValidatedJson<T>` deserializes the body and runs `T::validate()` before the
//! handler sees it. `OptionalJson<T>` treats an absent body as `T::default()`.
//! Both report failures as `RestroError` JSON.

use crate::core::error::{RestroError, ValidationError};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(
///     State(host): State<Arc<ServerHost>>,
///     ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
/// ) -> RestroResult<impl IntoResponse> {
///     // payload is already validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = RestroError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            RestroError::from(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}

/// JSON body that may be left out entirely
///
/// An empty or whitespace-only body yields `T::default()`. Anything else must
/// parse as JSON; the `Content-Type` header is not checked.
#[derive(Debug, Clone, Default)]
pub struct OptionalJson<T>(pub T);

impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = RestroError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            RestroError::from(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| {
                ValidationError::InvalidJson {
                    message: e.to_string(),
                }
                .into()
            })
    }
}
