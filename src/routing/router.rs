//! Route lookup and path rewriting.
//!
//! # Responsibilities
//! - Extract the service segment from `/api/<service>/<rest>`
//! - Look up the backend registered under that segment
//! - Produce the upstream path `/<service>/<rest>`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(log n) lookup on the service segment
//! - Explicit NoMatch (`None`) rather than silent default

use std::sync::Arc;

use crate::routing::registry::{Backend, BackendRegistry};

/// Path prefix under which every proxied service is mounted.
pub const API_PREFIX: &str = "/api";

/// Result of a successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget<'a> {
    pub backend: &'a Backend,
    /// Path on the backend, without query string.
    pub upstream_path: String,
}

impl RouteTarget<'_> {
    /// Upstream URL without query string.
    pub fn upstream_url(&self) -> String {
        self.backend.url_for(&self.upstream_path)
    }
}

/// Resolves inbound paths against the backend registry.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Arc<BackendRegistry>,
}

impl Router {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve an inbound path to its backend and rewritten upstream path.
    ///
    /// An empty remainder drops the trailing segment: `/api/recetas/` becomes
    /// `/recetas`. Returns `None` when the path is outside `/api/` or names an
    /// unknown service.
    pub fn resolve(&self, path: &str) -> Option<RouteTarget<'_>> {
        let rest = path.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
        let (service, remainder) = rest.split_once('/').unwrap_or((rest, ""));
        let backend = self.registry.get(service)?;

        let upstream_path = if remainder.is_empty() {
            format!("/{}", service)
        } else {
            format!("/{}/{}", service, remainder)
        };

        Some(RouteTarget {
            backend,
            upstream_path,
        })
    }
}
