//! In-memory storage for testing and development
//!
//! Every service keeps its records behind a lock. The counter is updated in a
//! single critical section so concurrent increments never observe the same
//! value.

use crate::core::query::PageRequest;
use crate::core::service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, SearchPage,
    UserService,
};
use crate::entities::{Booking, Category, MenuItem, Order, User};
use crate::search::FilterPredicate;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// In-memory counter service
#[derive(Clone, Default)]
pub struct InMemoryCounterService {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryCounterService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterService for InMemoryCounterService {
    async fn increment(&self, name: &str) -> Result<u64> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|e| anyhow!("Failed to acquire counter lock: {}", e))?;

        let value = counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

/// In-memory order service
#[derive(Clone, Default)]
pub struct InMemoryOrderService {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if orders.values().any(|o| o.display_id == order.display_id) {
            return Err(anyhow!("Duplicate display id {}", order.display_id));
        }
        orders.insert(order.order_id, order.clone());

        Ok(order)
    }

    async fn get(&self, order_id: &Uuid) -> Result<Option<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.get(order_id).cloned())
    }

    async fn search(&self, predicate: &FilterPredicate, page: PageRequest) -> Result<SearchPage> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matching: Vec<&Order> = orders.values().filter(|o| predicate.matches(*o)).collect();
        matching.sort_by_key(|o| Reverse((o.created_at, o.display_id.clone())));

        let total_count = matching.len() as u64;
        let total_price = matching.iter().map(|o| o.total()).sum();
        let orders = matching
            .into_iter()
            .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(SearchPage {
            orders,
            total_count,
            total_price,
        })
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(|o| Reverse((o.created_at, o.display_id.clone())));
        Ok(all)
    }

    async fn update(&self, order: Order) -> Result<Option<Order>> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match orders.get_mut(&order.order_id) {
            Some(stored) => {
                *stored = order.clone();
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, order_id: &Uuid) -> Result<Option<Order>> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(orders.remove(order_id))
    }

    async fn find_active_for_table(&self, table_number: u32) -> Result<Option<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders
            .values()
            .find(|o| o.table_number == Some(table_number) && o.is_active())
            .cloned())
    }
}

/// In-memory menu service, keeps insertion order
#[derive(Clone, Default)]
pub struct InMemoryMenuService {
    items: Arc<RwLock<Vec<MenuItem>>>,
}

impl InMemoryMenuService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuService for InMemoryMenuService {
    async fn create(&self, item: MenuItem) -> Result<MenuItem> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.push(item.clone());
        Ok(item)
    }

    async fn find_by_item_id(&self, item_id: &str) -> Result<Option<MenuItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.iter().find(|i| i.item_id == item_id).cloned())
    }

    async fn list(&self) -> Result<Vec<MenuItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.clone())
    }

    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match items.iter_mut().find(|i| i.item_id == item.item_id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, item_id: &str) -> Result<Option<MenuItem>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(items
            .iter()
            .position(|i| i.item_id == item_id)
            .map(|index| items.remove(index)))
    }
}

/// In-memory booking service
#[derive(Clone, Default)]
pub struct InMemoryBookingService {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingService for InMemoryBookingService {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let bookings = self
            .bookings
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(bookings.clone())
    }
}

/// In-memory category service
#[derive(Clone, Default)]
pub struct InMemoryCategoryService {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryService for InMemoryCategoryService {
    async fn create(&self, category: Category) -> Result<Category> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        categories.push(category.clone());
        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let categories = self
            .categories
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(categories.clone())
    }
}

/// In-memory user service, keyed by username
#[derive(Clone, Default)]
pub struct InMemoryUserService {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn create(&self, user: User) -> Result<User> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if users.contains_key(&user.username) {
            return Err(anyhow!("Duplicate username {}", user.username));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(username).cloned())
    }
}
