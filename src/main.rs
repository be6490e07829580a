//! restro-server binary
//!
//! `restro-server [--config path] [serve]` starts the API; `create-admin`
//! adds an admin account and exits. The config path may also come from
//! `RESTRO_CONFIG`; a missing file means built-in defaults, and environment
//! variables override either. Startup fails without a JWT secret.

use anyhow::Result;
use clap::{Parser, Subcommand};
use restro::config::{AppConfig, StorageBackend};
use restro::core::JwtAuthProvider;
use restro::core::error::ConfigError;
use restro::server::ServerBuilder;
use restro::storage::StorageServices;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/restro.yaml";

#[derive(Parser)]
#[command(name = "restro-server")]
#[command(about = "Restaurant order backend")]
struct Cli {
    /// YAML configuration file
    #[arg(long, short, env = "RESTRO_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Create an admin account in the configured storage and exit
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "RESTRO_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restro=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::CreateAdmin { username, password } => {
            let storage = connect_storage(&config).await?;
            if storage
                .ensure_admin(&username, &password, config.auth.bcrypt_cost)
                .await?
            {
                tracing::info!(username = %username, "admin user created");
            } else {
                tracing::warn!(username = %username, "admin user already exists, left unchanged");
            }
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let secret = config.auth.require_secret()?;
    let tokens = JwtAuthProvider::with_ttl(
        secret,
        chrono::Duration::hours(config.auth.token_ttl_hours),
    );

    let storage = connect_storage(&config).await?;
    if let Some((username, password)) = config.auth.admin_account()
        && storage
            .ensure_admin(username, password, config.auth.bcrypt_cost)
            .await?
    {
        tracing::info!(username = %username, "seeded admin user");
    }

    ServerBuilder::new()
        .with_storage(storage)
        .with_jwt(tokens)
        .with_pagination(config.pagination)
        .with_bill(config.bill.clone())
        .serve(&config.server.bind_address)
        .await
}

fn load_config(path: &Path) -> Result<AppConfig> {
    let config = match AppConfig::from_yaml_file(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "configuration loaded");
            config
        }
        Err(ConfigError::FileNotFound { .. }) => {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            AppConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    let config = config.apply_env()?;
    config.validate()?;
    Ok(config)
}

async fn connect_storage(config: &AppConfig) -> Result<StorageServices> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            Ok(StorageServices::in_memory())
        }
        #[cfg(feature = "mongodb_backend")]
        StorageBackend::Mongodb => {
            use mongodb::bson::doc;
            use restro::core::error::StorageError;

            let connection_error = |e: mongodb::error::Error| StorageError::ConnectionError {
                backend: "mongodb".to_string(),
                message: e.to_string(),
            };

            let client = mongodb::Client::with_uri_str(&config.storage.uri)
                .await
                .map_err(connection_error)?;
            let database = client.database(&config.storage.database);
            database
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(connection_error)?;

            tracing::info!(database = %config.storage.database, "using mongodb storage");
            Ok(StorageServices::mongodb(database))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageBackend::Mongodb => Err(restro::core::error::StorageError::Unavailable {
            backend: "mongodb".to_string(),
        }
        .into()),
    }
}
