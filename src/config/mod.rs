//! Configuration loading and management
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! | Variable                | Setting                  |
//! |-------------------------|--------------------------|
//! | `RESTRO_BIND`           | `server.bind_address`    |
//! | `PORT`                  | port of `bind_address`   |
//! | `RESTRO_STORAGE`        | `storage.backend`        |
//! | `MONGODB_URI`           | `storage.uri`            |
//! | `RESTRO_DATABASE`       | `storage.database`       |
//! | `JWT_SECRET`            | `auth.jwt_secret`        |
//! | `RESTRO_JWT_SECRET`     | `auth.jwt_secret`        |
//! | `RESTRO_ADMIN_USERNAME` | `auth.admin_username`    |
//! | `RESTRO_ADMIN_PASSWORD` | `auth.admin_password`    |
//!
//! `RESTRO_JWT_SECRET` wins over `JWT_SECRET` when both are set.

use crate::core::error::ConfigError;
use crate::core::jwt::DEFAULT_TOKEN_TTL_HOURS;
use crate::core::password::DEFAULT_PASSWORD_COST;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Which storage backend serves the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Mongodb,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "mongodb" | "mongo" => Ok(StorageBackend::Mongodb),
            other => Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                value: other.to_string(),
                message: "expected 'memory' or 'mongodb'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub uri: String,
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "restro".to_string(),
        }
    }
}

/// Admin login settings
///
/// The server refuses to start without `jwt_secret`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret signing login tokens
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    /// bcrypt work factor for seeded admin passwords
    pub bcrypt_cost: u32,
    /// Admin account created at startup when it does not exist yet
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: DEFAULT_PASSWORD_COST,
            admin_username: None,
            admin_password: None,
        }
    }
}

impl AuthConfig {
    /// The signing secret, or the error that stops startup
    pub fn require_secret(&self) -> Result<&str, ConfigError> {
        self.jwt_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "auth.jwt_secret".to_string(),
                value: String::new(),
                message: "a JWT secret is required; set JWT_SECRET".to_string(),
            })
    }

    /// Both halves of the seeded admin account, if configured
    pub fn admin_account(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Restaurant details printed at the top and bottom of every bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillConfig {
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    pub footer: String,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            restaurant_name: "Indian Tadka".to_string(),
            address: "Friedrichstrasse 69, 66538 Neunkirchen".to_string(),
            phone: "Tel.: +4915212628877".to_string(),
            footer: "Vielen Dank fuer Ihre Bestellung!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 8,
            max_page_size: 100,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub bill: BillConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Override settings from the process environment
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override settings from any variable lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = lookup("RESTRO_BIND") {
            self.server.bind_address = bind;
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
            let host = self
                .server
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.server.bind_address = format!("{}:{}", host, port);
        }
        if let Some(backend) = lookup("RESTRO_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            self.storage.uri = uri;
        }
        if let Some(database) = lookup("RESTRO_DATABASE") {
            self.storage.database = database;
        }
        if let Some(secret) = lookup("RESTRO_JWT_SECRET").or_else(|| lookup("JWT_SECRET")) {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(username) = lookup("RESTRO_ADMIN_USERNAME") {
            self.auth.admin_username = Some(username);
        }
        if let Some(password) = lookup("RESTRO_ADMIN_PASSWORD") {
            self.auth.admin_password = Some(password);
        }

        Ok(self)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        let pagination = &self.pagination;
        if pagination.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if pagination.default_page_size == 0
            || pagination.default_page_size > pagination.max_page_size
        {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                value: pagination.default_page_size.to_string(),
                message: format!("must be between 1 and {}", pagination.max_page_size),
            });
        }
        let auth = &self.auth;
        if auth.token_ttl_hours < 1 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_hours".to_string(),
                value: auth.token_ttl_hours.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(4..=31).contains(&auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost".to_string(),
                value: auth.bcrypt_cost.to_string(),
                message: "must be between 4 and 31".to_string(),
            });
        }
        if auth.admin_username.is_some() != auth.admin_password.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "auth.admin_username".to_string(),
                value: auth.admin_username.clone().unwrap_or_default(),
                message: "admin_username and admin_password must be set together".to_string(),
            });
        }
        if self.storage.backend == StorageBackend::Mongodb && self.storage.database.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database".to_string(),
                value: String::new(),
                message: "a database name is required for mongodb".to_string(),
            });
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "server.bind_address".to_string(),
                value: self.server.bind_address.clone(),
                message: "expected host:port".to_string(),
            })
    }
}
