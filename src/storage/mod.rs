//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::{
    InMemoryBookingService, InMemoryCategoryService, InMemoryCounterService,
    InMemoryMenuService, InMemoryOrderService, InMemoryUserService,
};
#[cfg(feature = "mongodb_backend")]
pub use mongodb::{
    MongoBookingService, MongoCategoryService, MongoCounterService, MongoMenuService,
    MongoOrderService, MongoUserService,
};

use crate::core::service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, UserService,
};
use crate::entities::User;
use anyhow::Result;
use std::sync::Arc;

/// One implementation of every service, sharing a backend
#[derive(Clone)]
pub struct StorageServices {
    pub counters: Arc<dyn CounterService>,
    pub orders: Arc<dyn OrderService>,
    pub menu: Arc<dyn MenuService>,
    pub bookings: Arc<dyn BookingService>,
    pub categories: Arc<dyn CategoryService>,
    pub users: Arc<dyn UserService>,
}

impl StorageServices {
    /// Fresh, empty in-memory storage
    pub fn in_memory() -> Self {
        Self {
            counters: Arc::new(InMemoryCounterService::new()),
            orders: Arc::new(InMemoryOrderService::new()),
            menu: Arc::new(InMemoryMenuService::new()),
            bookings: Arc::new(InMemoryBookingService::new()),
            categories: Arc::new(InMemoryCategoryService::new()),
            users: Arc::new(InMemoryUserService::new()),
        }
    }

    /// Storage over the collections of one MongoDB database
    #[cfg(feature = "mongodb_backend")]
    pub fn mongodb(database: ::mongodb::Database) -> Self {
        Self {
            counters: Arc::new(MongoCounterService::new(database.clone())),
            orders: Arc::new(MongoOrderService::new(database.clone())),
            menu: Arc::new(MongoMenuService::new(database.clone())),
            bookings: Arc::new(MongoBookingService::new(database.clone())),
            categories: Arc::new(MongoCategoryService::new(database.clone())),
            users: Arc::new(MongoUserService::new(database)),
        }
    }

    /// Create the admin account unless the username is already taken
    ///
    /// Returns whether a user was created. An existing account keeps its
    /// password.
    pub async fn ensure_admin(&self, username: &str, password: &str, cost: u32) -> Result<bool> {
        if self.users.find_by_username(username.trim()).await?.is_some() {
            return Ok(false);
        }
        let user = User::with_password(username, password, cost).await?;
        self.users.create(user).await?;
        Ok(true)
    }
}

impl Default for StorageServices {
    fn default() -> Self {
        Self::in_memory()
    }
}
