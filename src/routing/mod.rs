//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (strip /api, pick service segment)
//!     → registry.rs (service → backend base URL)
//!     → Return: RouteTarget { backend, upstream_path } or NoMatch
//!
//! Registry Construction (at startup):
//!     BackendConfig[]
//!     → Parse base URLs
//!     → Freeze as immutable BackendRegistry
//! ```
//!
//! # Design Decisions
//! - Registry built at startup, immutable at runtime
//! - No regex in hot path (segment lookup only)
//! - Deterministic: same input always matches same backend

pub mod registry;
pub mod router;

pub use registry::{Backend, BackendRegistry, RegistryError};
pub use router::{RouteTarget, Router, API_PREFIX};
