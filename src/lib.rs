//! Service gateway library.
//!
//! Routes `/api/<service>/...` requests to a static set of backend services
//! and aggregates their health.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
