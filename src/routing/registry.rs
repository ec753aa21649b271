//! Static backend registry.
//!
//! # Responsibilities
//! - Hold the route prefix → base URL mapping built at startup
//! - Compose upstream URLs from a base URL and a rewritten path
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - Ordered by name so listings and health reports are deterministic

use std::collections::BTreeMap;
use url::Url;

use crate::config::BackendConfig;

/// Errors raised while building the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("backend {name:?} has invalid url: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("backend {0:?} is configured more than once")]
    Duplicate(String),
}

/// A single backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    /// Route prefix selecting this backend.
    pub name: String,
    /// Base URL every upstream path is appended to.
    pub base_url: Url,
}

impl Backend {
    /// Full upstream URL for an absolute `path` on this backend.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }
}

/// Immutable mapping from route prefix to backend.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Backend>,
}

impl BackendRegistry {
    /// Build the registry from configuration.
    pub fn from_config(configs: &[BackendConfig]) -> Result<Self, RegistryError> {
        let mut backends = BTreeMap::new();
        for config in configs {
            let base_url = Url::parse(&config.url).map_err(|source| RegistryError::InvalidUrl {
                name: config.name.clone(),
                source,
            })?;
            let backend = Backend {
                name: config.name.clone(),
                base_url,
            };
            if backends.insert(config.name.clone(), backend).is_some() {
                return Err(RegistryError::Duplicate(config.name.clone()));
            }
        }

        tracing::debug!(backends = backends.len(), "Backend registry built");
        Ok(Self { backends })
    }

    pub fn get(&self, name: &str) -> Option<&Backend> {
        self.backends.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Backend> {
        self.backends.values()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let registry = BackendRegistry::from_config(&[
            BackendConfig::new("a", "http://localhost:8001"),
            BackendConfig::new("b", "http://svc:9000/base/"),
        ])
        .unwrap();

        assert_eq!(
            registry.get("a").unwrap().url_for("/a/1"),
            "http://localhost:8001/a/1"
        );
        assert_eq!(
            registry.get("b").unwrap().url_for("/b"),
            "http://svc:9000/base/b"
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = BackendRegistry::from_config(&[
            BackendConfig::new("a", "http://localhost:1"),
            BackendConfig::new("a", "http://localhost:2"),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "a"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = BackendRegistry::from_config(&[BackendConfig::new("a", "::nope")]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidUrl { .. }));
    }

    #[test]
    fn test_iteration_is_sorted_by_name() {
        let registry = BackendRegistry::from_config(&[
            BackendConfig::new("zeta", "http://localhost:1"),
            BackendConfig::new("alpha", "http://localhost:2"),
        ])
        .unwrap();
        let names: Vec<_> = registry.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
