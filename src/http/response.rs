//! Gateway-generated response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::{BackendRegistry, API_PREFIX};

/// Body of `GET /`: which services are proxied and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub message: String,
    pub version: String,
    /// Service name → backend base URL.
    pub services: BTreeMap<String, String>,
    /// Service name → public path prefix.
    pub endpoints: BTreeMap<String, String>,
}

impl GatewayInfo {
    pub fn from_registry(registry: &BackendRegistry) -> Self {
        let services = registry
            .iter()
            .map(|b| (b.name.clone(), b.base_url.as_str().trim_end_matches('/').to_string()))
            .collect();
        let endpoints = registry
            .iter()
            .map(|b| (b.name.clone(), format!("{}/{}", API_PREFIX, b.name)))
            .collect();

        Self {
            message: "Service gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services,
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_info_lists_services_and_endpoints() {
        let registry = BackendRegistry::from_config(&[
            BackendConfig::new("recetas", "http://localhost:8001"),
            BackendConfig::new("ingredientes", "http://localhost:8002"),
        ])
        .unwrap();

        let info = GatewayInfo::from_registry(&registry);
        assert_eq!(info.services["recetas"], "http://localhost:8001");
        assert_eq!(info.endpoints["recetas"], "/api/recetas");
        assert_eq!(info.endpoints["ingredientes"], "/api/ingredientes");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
