//! Typed error handling for the restro backend
//!
//! Handlers return [`RestroError`], which knows its HTTP status, a stable
//! machine-readable code, and how to render itself as JSON.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing records and refused business operations
//! - [`ValidationError`]: malformed or invalid request payloads
//! - [`StorageError`]: storage backend failures (never retried)
//! - [`RequestError`]: authentication and request-level failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! let order = host
//!     .orders
//!     .get(&order_id)
//!     .await?
//!     .ok_or_else(|| EntityError::not_found("order", order_id))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the restro backend
#[derive(Debug)]
pub enum RestroError {
    /// Entity-related errors (lookups and business rules)
    Entity(EntityError),

    /// Validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Server-side failures outside storage (rendering, token signing)
    Internal(String),
}

impl fmt::Display for RestroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestroError::Entity(e) => write!(f, "{}", e),
            RestroError::Validation(e) => write!(f, "{}", e),
            RestroError::Storage(e) => write!(f, "{}", e),
            RestroError::Request(e) => write!(f, "{}", e),
            RestroError::Config(e) => write!(f, "{}", e),
            RestroError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RestroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RestroError::Entity(e) => Some(e),
            RestroError::Validation(e) => Some(e),
            RestroError::Storage(e) => Some(e),
            RestroError::Request(e) => Some(e),
            RestroError::Config(e) => Some(e),
            RestroError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RestroError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestroError::Entity(e) => e.status_code(),
            RestroError::Validation(_) => StatusCode::BAD_REQUEST,
            RestroError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestroError::Request(e) => e.status_code(),
            RestroError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestroError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RestroError::Entity(e) => e.error_code(),
            RestroError::Validation(_) => "VALIDATION_ERROR",
            RestroError::Storage(_) => "STORAGE_ERROR",
            RestroError::Request(e) => e.error_code(),
            RestroError::Config(_) => "CONFIG_ERROR",
            RestroError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        RestroError::Internal(err.to_string())
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RestroError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            RestroError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RestroError::Validation(ValidationError::FieldError { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RestroError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Service traits report failures through `anyhow`; anything that reaches a
/// handler that way is a storage failure.
impl From<anyhow::Error> for RestroError {
    fn from(err: anyhow::Error) -> Self {
        RestroError::Storage(StorageError::QueryError {
            message: format!("{:#}", err),
        })
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// A single record was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// A list or export endpoint found nothing to return
    #[error("No {entity_type} found{}", purpose.as_deref().map(|p| format!(" to {}.", p)).unwrap_or_default())]
    NoneFound {
        entity_type: String,
        purpose: Option<String>,
    },

    /// A record with the same business key already exists
    #[error("{entity_type} ID {id} already exists. Please use a unique ID.")]
    AlreadyExists { entity_type: String, id: String },

    /// The operation is refused by a business rule
    #[error("{message}")]
    RuleViolation { entity_type: String, message: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn none_found(entity_type: &str) -> Self {
        EntityError::NoneFound {
            entity_type: entity_type.to_string(),
            purpose: None,
        }
    }

    /// Nothing to hand to `purpose`, e.g. "No orders found to export."
    pub fn none_found_to(entity_type: &str, purpose: &str) -> Self {
        EntityError::NoneFound {
            entity_type: entity_type.to_string(),
            purpose: Some(purpose.to_string()),
        }
    }

    pub fn already_exists(entity_type: &str, id: impl ToString) -> Self {
        EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn rule(entity_type: &str, message: impl Into<String>) -> Self {
        EntityError::RuleViolation {
            entity_type: entity_type.to_string(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::NoneFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
            EntityError::RuleViolation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::NoneFound { .. } => "NO_ENTITIES_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::RuleViolation { .. } => "RULE_VIOLATION",
        }
    }
}

impl From<EntityError> for RestroError {
    fn from(err: EntityError) -> Self {
        RestroError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("{message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Invalid UUID format
    #[error("Invalid UUID format: {value}")]
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_validation_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

fn collect_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldValidationError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<ValidationError> for RestroError {
    fn from(err: ValidationError) -> Self {
        RestroError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for RestroError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RestroError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("Storage query error: {message}")]
    QueryError { message: String },

    /// Backend not compiled in or not reachable
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl From<StorageError> for RestroError {
    fn from(err: StorageError) -> Self {
        RestroError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the HTTP request itself
#[derive(Debug, Error)]
pub enum RequestError {
    /// Missing or rejected credentials
    #[error("{message}")]
    Unauthorized { message: String },

    /// Login with an unknown user or a wrong password
    #[error("{message}")]
    InvalidCredentials { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::InvalidCredentials { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
        }
    }
}

impl From<RequestError> for RestroError {
    fn from(err: RequestError) -> Self {
        RestroError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file.as_deref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<ConfigError> for RestroError {
    fn from(err: ConfigError) -> Self {
        RestroError::Config(err)
    }
}

/// Result alias used by HTTP handlers
pub type RestroResult<T> = std::result::Result<T, RestroError>;
