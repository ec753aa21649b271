//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → GET /        → response.rs (route listing)
//!     → GET /health  → health aggregator
//!     → /api/...     → routing → proxy forwarder
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::GatewayInfo;
pub use server::{AppState, HttpServer};
