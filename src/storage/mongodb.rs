//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! restro-rs = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One collection per record type: `orders`, `menus`, `bookings`,
//! `categories`, `users`, plus `counters` holding `{ _id: <name>, seq: <int> }`.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, so UUIDs are stored as strings.
//! `createdAt` and `updatedAt` become BSON dates (millisecond precision) so
//! they sort chronologically. Each record's identifier field (`orderId` for
//! orders, `id` for the rest) is mapped to MongoDB's `_id`.

use crate::core::query::PageRequest;
use crate::core::service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, SearchPage,
    UserService,
};
use crate::entities::order::fields;
use crate::entities::{Booking, Category, MenuItem, Order, OrderStatus, User};
use crate::search::{Clause, Condition, FilterPredicate};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

pub const ORDERS: &str = "orders";
pub const COUNTERS: &str = "counters";
pub const MENUS: &str = "menus";
pub const BOOKINGS: &str = "bookings";
pub const CATEGORIES: &str = "categories";
pub const USERS: &str = "users";

/// Record fields stored as BSON dates
const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id_field` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value, id_field: &str) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove(id_field) {
        doc.insert("_id", id);
    }

    for field in TIMESTAMP_FIELDS {
        if let Some(Bson::String(raw)) = doc.get(field) {
            let instant = DateTime::parse_from_rfc3339(raw)
                .map_err(|e| anyhow!("Invalid timestamp in '{}': {}", field, e))?;
            let date = bson::DateTime::from_millis(instant.timestamp_millis());
            doc.insert(field, Bson::DateTime(date));
        }
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id_field`.
fn document_to_json(mut doc: Document, id_field: &str) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert(id_field, id);
    }

    for field in TIMESTAMP_FIELDS {
        if let Some(Bson::DateTime(date)) = doc.get(field)
            && let Some(instant) = DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis())
        {
            let raw = instant.to_rfc3339_opts(SecondsFormat::Millis, true);
            doc.insert(field, Bson::String(raw));
        }
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn to_document<T: Serialize>(record: &T, id_field: &str) -> Result<Document> {
    let json =
        serde_json::to_value(record).map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
    json_to_document(json, id_field)
}

fn from_document<T: DeserializeOwned>(doc: Document, id_field: &str) -> Result<T> {
    serde_json::from_value(document_to_json(doc, id_field))
        .map_err(|e| anyhow!("Failed to deserialize record from document: {}", e))
}

async fn collect_all<T: DeserializeOwned>(
    collection: &Collection<Document>,
    id_field: &str,
) -> Result<Vec<T>> {
    let cursor = collection
        .find(doc! {})
        .sort(doc! { "createdAt": 1 })
        .await
        .map_err(|e| anyhow!("Failed to list records: {}", e))?;

    let docs: Vec<Document> = cursor
        .try_collect()
        .await
        .map_err(|e| anyhow!("Failed to collect records: {}", e))?;

    docs.into_iter()
        .map(|d| from_document(d, id_field))
        .collect()
}

/// Read a numeric BSON value regardless of its stored width
fn bson_number(value: Option<&Bson>) -> Option<f64> {
    match value? {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(d) => Some(*d),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Predicate translation
// ---------------------------------------------------------------------------

/// Translate a search predicate into a MongoDB filter document
///
/// The empty predicate becomes `{}`, which matches every document.
pub fn predicate_to_document(predicate: &FilterPredicate) -> Document {
    if predicate.is_empty() {
        return doc! {};
    }
    let clauses: Vec<Document> = predicate.clauses().iter().map(clause_to_document).collect();
    doc! { "$and": clauses }
}

fn clause_to_document(clause: &Clause) -> Document {
    match clause {
        Clause::Field { field, condition } => {
            let condition = match condition {
                Condition::Equals(value) => Bson::String(value.clone()),
                Condition::Matches(pattern) => Bson::Document(doc! {
                    "$regex": pattern.as_regex(),
                    "$options": "i",
                }),
                Condition::Range { from, to } => Bson::Document(doc! {
                    "$gte": from.as_str(),
                    "$lte": to.as_str(),
                }),
                Condition::Is(flag) => Bson::Boolean(*flag),
            };
            let mut document = Document::new();
            document.insert(*field, condition);
            document
        }
        Clause::AnyOf(alternatives) => {
            let alternatives: Vec<Document> =
                alternatives.iter().map(predicate_to_document).collect();
            doc! { "$or": alternatives }
        }
    }
}

// ---------------------------------------------------------------------------
// MongoCounterService
// ---------------------------------------------------------------------------

/// Counter service backed by the `counters` collection
#[derive(Clone, Debug)]
pub struct MongoCounterService {
    database: Database,
}

impl MongoCounterService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COUNTERS)
    }
}

#[async_trait]
impl CounterService for MongoCounterService {
    /// Single `findOneAndUpdate` with `$inc` and upsert, returning the new value
    async fn increment(&self, name: &str) -> Result<u64> {
        let counter = self
            .collection()
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to increment counter '{}': {}", name, e))?
            .ok_or_else(|| anyhow!("Counter '{}' missing after upsert", name))?;

        match counter.get("seq") {
            Some(Bson::Int64(seq)) => u64::try_from(*seq).map_err(|e| anyhow!(e)),
            Some(Bson::Int32(seq)) => u64::try_from(*seq).map_err(|e| anyhow!(e)),
            other => Err(anyhow!("Counter '{}' has invalid seq {:?}", name, other)),
        }
    }
}

// ---------------------------------------------------------------------------
// MongoOrderService
// ---------------------------------------------------------------------------

/// Order service backed by the `orders` collection
///
/// A unique index on `displayId` is created before the first insert.
#[derive(Clone, Debug)]
pub struct MongoOrderService {
    database: Database,
    indexes: Arc<OnceCell<()>>,
}

impl MongoOrderService {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            indexes: Arc::new(OnceCell::new()),
        }
    }

    async fn ensure_indexes(&self) -> Result<()> {
        self.indexes
            .get_or_try_init(|| async {
                let unique_display_id = IndexModel::builder()
                    .keys(doc! { "displayId": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build();
                let by_creation = IndexModel::builder()
                    .keys(doc! { "createdAt": -1, "displayId": -1 })
                    .build();

                self.collection()
                    .create_indexes(vec![unique_display_id, by_creation])
                    .await
                    .map_err(|e| anyhow!("Failed to create order indexes: {}", e))?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(ORDERS)
    }

    fn to_document(order: &Order) -> Result<Document> {
        to_document(order, fields::ORDER_ID)
    }

    fn from_document(doc: Document) -> Result<Order> {
        from_document(doc, fields::ORDER_ID)
    }

    fn id_filter(order_id: &Uuid) -> Document {
        doc! { "_id": order_id.to_string() }
    }

    /// Sum of `price * quantity` over every item of every matching order
    async fn total_price(&self, filter: Document) -> Result<f64> {
        let pipeline = vec![
            doc! { "$match": filter },
            doc! { "$unwind": "$orderItems" },
            doc! { "$group": {
                "_id": Bson::Null,
                "total": { "$sum": { "$multiply": ["$orderItems.price", "$orderItems.quantity"] } },
            }},
        ];

        let mut cursor = self
            .collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| anyhow!("Failed to aggregate order totals: {}", e))?;

        let total = cursor
            .try_next()
            .await
            .map_err(|e| anyhow!("Failed to read order totals: {}", e))?
            .and_then(|group| bson_number(group.get("total")))
            .unwrap_or(0.0);

        Ok(total)
    }
}

#[async_trait]
impl OrderService for MongoOrderService {
    async fn create(&self, order: Order) -> Result<Order> {
        self.ensure_indexes().await?;
        let doc = Self::to_document(&order)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create order: {}", e))?;

        Ok(order)
    }

    async fn get(&self, order_id: &Uuid) -> Result<Option<Order>> {
        let doc = self
            .collection()
            .find_one(Self::id_filter(order_id))
            .await
            .map_err(|e| anyhow!("Failed to get order: {}", e))?;

        doc.map(Self::from_document).transpose()
    }

    async fn search(&self, predicate: &FilterPredicate, page: PageRequest) -> Result<SearchPage> {
        let filter = predicate_to_document(predicate);
        tracing::debug!(filter = %filter, "searching orders");

        let limit = i64::try_from(page.limit()).map_err(|e| anyhow!(e))?;
        let cursor = self
            .collection()
            .find(filter.clone())
            .sort(doc! { "createdAt": -1, "displayId": -1 })
            .skip(page.skip())
            .limit(limit)
            .await
            .map_err(|e| anyhow!("Failed to search orders: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect orders: {}", e))?;
        let orders = docs
            .into_iter()
            .map(Self::from_document)
            .collect::<Result<Vec<_>>>()?;

        let total_count = self
            .collection()
            .count_documents(filter.clone())
            .await
            .map_err(|e| anyhow!("Failed to count orders: {}", e))?;

        let total_price = self.total_price(filter).await?;

        Ok(SearchPage {
            orders,
            total_count,
            total_price,
        })
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "displayId": -1 })
            .await
            .map_err(|e| anyhow!("Failed to list orders: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect orders: {}", e))?;
        docs.into_iter().map(Self::from_document).collect()
    }

    async fn update(&self, order: Order) -> Result<Option<Order>> {
        let doc = Self::to_document(&order)?;

        let result = self
            .collection()
            .replace_one(Self::id_filter(&order.order_id), doc)
            .await
            .map_err(|e| anyhow!("Failed to update order: {}", e))?;

        Ok((result.matched_count > 0).then_some(order))
    }

    async fn delete(&self, order_id: &Uuid) -> Result<Option<Order>> {
        let doc = self
            .collection()
            .find_one_and_delete(Self::id_filter(order_id))
            .await
            .map_err(|e| anyhow!("Failed to delete order: {}", e))?;

        doc.map(Self::from_document).transpose()
    }

    async fn find_active_for_table(&self, table_number: u32) -> Result<Option<Order>> {
        let doc = self
            .collection()
            .find_one(doc! {
                "tableNumber": i64::from(table_number),
                "status": { "$ne": OrderStatus::Completed.as_str() },
            })
            .await
            .map_err(|e| anyhow!("Failed to look up table {}: {}", table_number, e))?;

        doc.map(Self::from_document).transpose()
    }
}

// ---------------------------------------------------------------------------
// Menu, bookings, categories
// ---------------------------------------------------------------------------

const RECORD_ID: &str = "id";

/// Menu service backed by the `menus` collection
#[derive(Clone, Debug)]
pub struct MongoMenuService {
    database: Database,
}

impl MongoMenuService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(MENUS)
    }
}

#[async_trait]
impl MenuService for MongoMenuService {
    async fn create(&self, item: MenuItem) -> Result<MenuItem> {
        self.collection()
            .insert_one(to_document(&item, RECORD_ID)?)
            .await
            .map_err(|e| anyhow!("Failed to create menu item: {}", e))?;

        Ok(item)
    }

    async fn find_by_item_id(&self, item_id: &str) -> Result<Option<MenuItem>> {
        let doc = self
            .collection()
            .find_one(doc! { "itemId": item_id })
            .await
            .map_err(|e| anyhow!("Failed to get menu item: {}", e))?;

        doc.map(|d| from_document(d, RECORD_ID)).transpose()
    }

    async fn list(&self) -> Result<Vec<MenuItem>> {
        collect_all(&self.collection(), RECORD_ID).await
    }

    async fn update(&self, item: MenuItem) -> Result<Option<MenuItem>> {
        let result = self
            .collection()
            .replace_one(
                doc! { "itemId": item.item_id.as_str() },
                to_document(&item, RECORD_ID)?,
            )
            .await
            .map_err(|e| anyhow!("Failed to update menu item: {}", e))?;

        Ok((result.matched_count > 0).then_some(item))
    }

    async fn delete(&self, item_id: &str) -> Result<Option<MenuItem>> {
        let doc = self
            .collection()
            .find_one_and_delete(doc! { "itemId": item_id })
            .await
            .map_err(|e| anyhow!("Failed to delete menu item: {}", e))?;

        doc.map(|d| from_document(d, RECORD_ID)).transpose()
    }
}

/// Booking service backed by the `bookings` collection
#[derive(Clone, Debug)]
pub struct MongoBookingService {
    database: Database,
}

impl MongoBookingService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(BOOKINGS)
    }
}

#[async_trait]
impl BookingService for MongoBookingService {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        self.collection()
            .insert_one(to_document(&booking, RECORD_ID)?)
            .await
            .map_err(|e| anyhow!("Failed to create booking: {}", e))?;

        Ok(booking)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        collect_all(&self.collection(), RECORD_ID).await
    }
}

/// Category service backed by the `categories` collection
#[derive(Clone, Debug)]
pub struct MongoCategoryService {
    database: Database,
}

impl MongoCategoryService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(CATEGORIES)
    }
}

#[async_trait]
impl CategoryService for MongoCategoryService {
    async fn create(&self, category: Category) -> Result<Category> {
        self.collection()
            .insert_one(to_document(&category, RECORD_ID)?)
            .await
            .map_err(|e| anyhow!("Failed to create category: {}", e))?;

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        collect_all(&self.collection(), RECORD_ID).await
    }
}

/// User service backed by the `users` collection
///
/// A unique index on `username` is created before the first insert.
#[derive(Clone, Debug)]
pub struct MongoUserService {
    database: Database,
    indexes: Arc<OnceCell<()>>,
}

impl MongoUserService {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            indexes: Arc::new(OnceCell::new()),
        }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(USERS)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        self.indexes
            .get_or_try_init(|| async {
                let unique_username = IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build();

                self.collection()
                    .create_index(unique_username)
                    .await
                    .map_err(|e| anyhow!("Failed to create user indexes: {}", e))?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserService for MongoUserService {
    async fn create(&self, user: User) -> Result<User> {
        self.ensure_indexes().await?;
        self.collection()
            .insert_one(to_document(&user, RECORD_ID)?)
            .await
            .map_err(|e| anyhow!("Failed to create user: {}", e))?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let doc = self
            .collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| anyhow!("Failed to get user: {}", e))?;

        doc.map(|d| from_document(d, RECORD_ID)).transpose()
    }
}
