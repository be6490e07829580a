//! Service traits implemented by the storage backends
//!
//! Handlers only ever talk to these traits. Every method is a single storage
//! round trip or, for [`OrderService::search`], one logical query. Failures
//! are returned as `anyhow::Error` and are never retried.

use crate::core::query::PageRequest;
use crate::entities::{Booking, Category, MenuItem, Order, User};
use crate::search::FilterPredicate;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persisted named counters
#[async_trait]
pub trait CounterService: Send + Sync {
    /// Atomically increment the counter and return the new value
    ///
    /// A missing counter starts from 0, so the first call returns 1. Must be
    /// one indivisible backend operation, never a read followed by a write.
    async fn increment(&self, name: &str) -> Result<u64>;
}

/// One page of search results plus aggregates over the full match set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub orders: Vec<Order>,
    pub total_count: u64,
    /// Sum of `price * quantity` over every matching order, not only this page
    pub total_price: f64,
}

/// Service trait for managing orders
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Insert a new order
    async fn create(&self, order: Order) -> Result<Order>;

    /// Get an order by its internal ID
    async fn get(&self, order_id: &Uuid) -> Result<Option<Order>>;

    /// Fetch a page of orders matching the predicate, newest first
    async fn search(&self, predicate: &FilterPredicate, page: PageRequest) -> Result<SearchPage>;

    /// Fetch a page of all orders, newest first
    async fn list(&self, page: PageRequest) -> Result<SearchPage> {
        self.search(&FilterPredicate::match_all(), page).await
    }

    /// Every stored order, newest first, for exports
    async fn all(&self) -> Result<Vec<Order>>;

    /// Replace a stored order, returns `None` when it no longer exists
    async fn update(&self, order: Order) -> Result<Option<Order>>;

    /// Delete an order and return what was removed
    async fn delete(&self, order_id: &Uuid) -> Result<Option<Order>>;

    /// Find an order on this table that is not yet completed
    async fn find_active_for_table(&self, table_number: u32) -> Result<Option<Order>>;
}

/// Service trait for the menu
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn create(&self, item: MenuItem) -> Result<MenuItem>;

    /// Look up a menu item by its business ID
    async fn find_by_item_id(&self, item_id: &str) -> Result<Option<MenuItem>>;

    async fn list(&self) -> Result<Vec<MenuItem>>;

    /// Replace a menu item, returns `None` when no item has this business ID
    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>>;

    async fn delete(&self, item_id: &str) -> Result<Option<MenuItem>>;
}

/// Service trait for table reservations
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<Booking>;

    async fn list(&self) -> Result<Vec<Booking>>;
}

/// Service trait for menu categories
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, category: Category) -> Result<Category>;

    async fn list(&self) -> Result<Vec<Category>>;
}

/// Service trait for admin accounts
#[async_trait]
pub trait UserService: Send + Sync {
    /// Insert a user; a taken username is an error
    async fn create(&self, user: User) -> Result<User>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
