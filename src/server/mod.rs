//! HTTP server for the restaurant API
//!
//! `ServerBuilder` assembles storage, auth and pagination into a `ServerHost`,
//! and `RestExposure` turns the host into the Axum router.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
