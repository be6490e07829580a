//! HTTP handlers, one module per resource
//!
//! Every handler takes `State<Arc<ServerHost>>` and returns `RestroResult`,
//! so failures render as the JSON error body of [`crate::core::error`].

pub mod auth;
pub mod bills;
pub mod bookings;
pub mod categories;
pub mod menu;
pub mod orders;
