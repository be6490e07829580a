//! Server host holding the application state
//!
//! `ServerHost` is the single source of truth shared by every handler: the
//! storage services, the display-ID sequencer, the auth provider, the login
//! token issuer, the pagination bounds and the bill header. Handlers receive
//! it as `State<Arc<ServerHost>>`.

use crate::config::{BillConfig, PaginationConfig};
use crate::core::auth::AuthProvider;
use crate::core::jwt::JwtAuthProvider;
use crate::core::query::{PageRequest, PaginationParams};
use crate::core::sequence::DisplayIdSequencer;
use crate::core::service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, UserService,
};
use crate::storage::StorageServices;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(
///     StorageServices::in_memory(),
///     Arc::new(NoAuthProvider),
///     PaginationConfig::default(),
/// ));
/// let app = RestExposure::build_router(host, vec![]);
/// ```
pub struct ServerHost {
    pub counters: Arc<dyn CounterService>,
    pub orders: Arc<dyn OrderService>,
    pub menu: Arc<dyn MenuService>,
    pub bookings: Arc<dyn BookingService>,
    pub categories: Arc<dyn CategoryService>,
    pub users: Arc<dyn UserService>,

    /// Assigns display IDs to new orders
    pub sequencer: DisplayIdSequencer,

    /// Decides who may call admin routes
    pub auth: Arc<dyn AuthProvider>,

    /// Signs login tokens; `None` leaves `/auth/login` unable to answer
    pub tokens: Option<Arc<JwtAuthProvider>>,

    pub pagination: PaginationConfig,
    pub bill: BillConfig,
}

impl ServerHost {
    pub fn new(
        storage: StorageServices,
        auth: Arc<dyn AuthProvider>,
        pagination: PaginationConfig,
    ) -> Self {
        let sequencer = DisplayIdSequencer::new(storage.counters.clone());
        Self {
            counters: storage.counters,
            orders: storage.orders,
            menu: storage.menu,
            bookings: storage.bookings,
            categories: storage.categories,
            users: storage.users,
            sequencer,
            auth,
            tokens: None,
            pagination,
            bill: BillConfig::default(),
        }
    }

    pub fn with_token_issuer(mut self, tokens: Arc<JwtAuthProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_bill(mut self, bill: BillConfig) -> Self {
        self.bill = bill;
        self
    }

    /// Resolve request pagination against the configured bounds
    pub fn page(&self, params: &PaginationParams) -> PageRequest {
        params.resolve(
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )
    }
}
