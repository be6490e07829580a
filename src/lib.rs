//! # restro
//!
//! Backend for a restaurant: orders with human-readable display IDs, a menu,
//! table reservations and menu categories, served over a JSON REST API.
//! Admins sign in for a JWT and can print PDF bills and export orders to
//! Excel.
//!
//! ## Order search
//!
//! The order-listing endpoint accepts a small command language:
//!
//! ```text
//! paymentMethod:Cash AND currentWeek:2025-01-15
//! dateRange:2025-01-01 TO 2025-01-31 OR orderType:pickup
//! ```
//!
//! [`search::tokenize`] splits the raw string into phrases and
//! [`search::resolve`] maps each `command:value` phrase to a filter clause.
//! Storage backends evaluate the resulting [`search::FilterPredicate`]
//! directly or translate it to their own query language.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restro::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_storage(StorageServices::in_memory())
//!         .with_jwt(JwtAuthProvider::new("secret"))
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod documents;
pub mod entities;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuthContext, AuthPolicy, AuthProvider, DisplayId, DisplayIdSequencer, FieldValue,
        Filterable, JwtAuthProvider, NoAuthProvider, PageRequest, PaginationMeta,
        PaginationParams, RestroError, RestroResult,
        service::{
            BookingService, CategoryService, CounterService, MenuService, OrderService,
            SearchPage, UserService,
        },
    };

    // === Documents ===
    pub use crate::documents::{Bill, orders_workbook, render_pdf};

    // === Entities ===
    pub use crate::entities::{
        Booking, Category, MenuItem, Order, OrderItem, OrderStatus, OrderType, User,
    };

    // === Search ===
    pub use crate::search::{FilterPredicate, SearchCommand, parse_search, tokenize};

    // === Storage ===
    pub use crate::storage::StorageServices;

    // === Config ===
    pub use crate::config::{AppConfig, BillConfig, PaginationConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
