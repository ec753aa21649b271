//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request + RouteTarget
//!     → request.rs (scrub headers, capture body and query)
//!     → forwarder.rs (one upstream call under a timeout)
//!     → UpstreamResponse (status + JSON) or ProxyError
//!     → error.rs (status code + {"detail": ...})
//! ```

pub mod error;
pub mod forwarder;
pub mod request;

pub use error::ProxyError;
pub use forwarder::{build_client, Forwarder, HttpClient, ProxyResult, UpstreamResponse};
pub use request::ProxyRequest;
