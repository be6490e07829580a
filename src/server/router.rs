//! Route table for the restaurant API
//!
//! Routes are split in two routers: the public one (login, menu reads,
//! reservations, category reads) and the admin one, which is wrapped in the
//! [`require_admin`] layer. Both share the same `ServerHost` state.

use super::handlers::{auth, bills, bookings, categories, menu, orders};
use super::host::ServerHost;
use crate::core::auth::require_admin;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Routes reachable without credentials
///
/// - POST /auth/login (also POST /login)
/// - GET /menu
/// - GET, POST /reservations
/// - GET /category
pub fn build_public_routes(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/login", post(auth::login))
        .route("/menu", get(menu::list_menu))
        .route(
            "/reservations",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/category", get(categories::list_categories))
        .with_state(host)
}

/// Routes guarded by the admin check
///
/// - GET, POST /orders
/// - POST /orders-listing
/// - GET, PUT, DELETE /orders/{orderId}
/// - PUT /orders/{orderId}/status
/// - PUT /orders/{orderId}/paymentMethod
/// - POST /menu, PUT and DELETE /menu/{itemId}
/// - POST /category
/// - GET /generate-bill/{orderId}
/// - POST /generate-bill-for-person
/// - GET /orders/exportData
pub fn build_admin_routes(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/orders-listing", post(orders::search_orders))
        .route(
            "/orders/{orderId}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/{orderId}/status", put(orders::update_status))
        .route(
            "/orders/{orderId}/paymentMethod",
            put(orders::update_payment_method),
        )
        .route("/menu", post(menu::create_menu_items))
        .route(
            "/menu/{itemId}",
            put(menu::update_menu_item).delete(menu::delete_menu_item),
        )
        .route("/category", post(categories::create_category))
        .route("/generate-bill/{orderId}", get(bills::generate_bill))
        .route(
            "/generate-bill-for-person",
            post(bills::generate_bill_for_person),
        )
        .route("/orders/exportData", get(bills::export_orders))
        .route_layer(middleware::from_fn_with_state(
            host.auth.clone(),
            require_admin,
        ))
        .with_state(host)
}

/// Public and admin routes merged into one router
pub fn build_api_routes(host: Arc<ServerHost>) -> Router {
    build_public_routes(host.clone()).merge(build_admin_routes(host))
}
