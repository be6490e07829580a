//! REST exposure
//!
//! Consumes a `ServerHost` and produces the Axum `Router` served by the
//! binary: health checks at the root, the resource routes nested under `/api`.

use super::super::host::ServerHost;
use crate::server::router::build_api_routes;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Prefix under which every resource route is mounted
pub const API_PREFIX: &str = "/api";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// The returned router carries:
    /// - Health check routes
    /// - The `/api` resource routes
    /// - Custom routes, merged at the root
    /// - Request tracing and permissive CORS
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().nest(API_PREFIX, build_api_routes(host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "restro"
        }))
    }
}
