//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::{BillConfig, PaginationConfig};
use crate::core::auth::AuthProvider;
use crate::core::jwt::JwtAuthProvider;
use crate::core::service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, UserService,
};
use crate::storage::StorageServices;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the restaurant HTTP server
///
/// Storage defaults to the in-memory services; single services can be swapped
/// after choosing a backend, which is how tests inject failing counters.
///
/// An auth provider is mandatory: building without one is an error. Open
/// admin routes need an explicit `.with_auth_provider(NoAuthProvider)`.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_storage(StorageServices::in_memory())
///     .with_jwt(JwtAuthProvider::new("secret"))
///     .build()?;
/// ```
pub struct ServerBuilder {
    storage: StorageServices,
    auth: Option<Arc<dyn AuthProvider>>,
    tokens: Option<Arc<JwtAuthProvider>>,
    pagination: PaginationConfig,
    bill: BillConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            storage: StorageServices::in_memory(),
            auth: None,
            tokens: None,
            pagination: PaginationConfig::default(),
            bill: BillConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace every storage service at once
    pub fn with_storage(mut self, storage: StorageServices) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_counter_service(mut self, service: impl CounterService + 'static) -> Self {
        self.storage.counters = Arc::new(service);
        self
    }

    pub fn with_order_service(mut self, service: impl OrderService + 'static) -> Self {
        self.storage.orders = Arc::new(service);
        self
    }

    pub fn with_menu_service(mut self, service: impl MenuService + 'static) -> Self {
        self.storage.menu = Arc::new(service);
        self
    }

    pub fn with_booking_service(mut self, service: impl BookingService + 'static) -> Self {
        self.storage.bookings = Arc::new(service);
        self
    }

    pub fn with_category_service(mut self, service: impl CategoryService + 'static) -> Self {
        self.storage.categories = Arc::new(service);
        self
    }

    pub fn with_user_service(mut self, service: impl UserService + 'static) -> Self {
        self.storage.users = Arc::new(service);
        self
    }

    /// Set the provider guarding admin routes
    ///
    /// Login stays unavailable unless a token issuer is set with [`Self::with_jwt`].
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Guard admin routes with JWTs and issue them from `/auth/login`
    pub fn with_jwt(mut self, provider: JwtAuthProvider) -> Self {
        let provider = Arc::new(provider);
        self.auth = Some(provider.clone());
        self.tokens = Some(provider);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Restaurant details printed on bills
    pub fn with_bill(mut self, bill: BillConfig) -> Self {
        self.bill = bill;
        self
    }

    /// Add custom routes to the server, merged at the root next to `/health`
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(self) -> Result<ServerHost> {
        if self.pagination.default_page_size == 0
            || self.pagination.default_page_size > self.pagination.max_page_size
        {
            anyhow::bail!(
                "invalid pagination bounds: default {} max {}",
                self.pagination.default_page_size,
                self.pagination.max_page_size
            );
        }

        let Some(auth) = self.auth else {
            anyhow::bail!("no auth provider configured; admin routes would be unguarded");
        };

        let mut host = ServerHost::new(self.storage, auth, self.pagination).with_bill(self.bill);
        if let Some(tokens) = self.tokens {
            host = host.with_token_issuer(tokens);
        }
        Ok(host)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown on SIGTERM or Ctrl+C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        },
    }
}
