//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Backend services, one per route prefix.
    pub backends: Vec<BackendConfig>,

    /// Timeout configuration for forwarded requests.
    pub timeouts: TimeoutConfig,

    /// Health probe settings.
    pub health_check: HealthCheckConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            backends: vec![
                BackendConfig::new("recetas", "http://localhost:8001"),
                BackendConfig::new("ingredientes", "http://localhost:8002"),
            ],
            timeouts: TimeoutConfig::default(),
            health_check: HealthCheckConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Largest inbound request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// A backend service fronted by the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Route prefix, i.e. the path segment after `/api/`.
    pub name: String,

    /// Base URL of the service (e.g., "http://localhost:8001").
    pub url: String,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Environment variable that overrides this backend's URL.
    ///
    /// `recetas` maps to `RECETAS_SERVICE_URL`.
    pub fn url_env_var(&self) -> String {
        format!("{}_SERVICE_URL", self.name.to_uppercase().replace('-', "_"))
    }
}

/// Timeout configuration for forwarded requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for one forwarded request/response in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Path probed on every backend.
    pub path: String,
}

impl HealthCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            path: "/health".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.backends.len(), 2);
        assert_eq!(config.backends[0].url, "http://localhost:8001");
        assert_eq!(config.timeouts.request(), Duration::from_secs(30));
        assert_eq!(config.health_check.timeout(), Duration::from_secs(5));
        assert_eq!(config.health_check.path, "/health");
    }

    #[test]
    fn test_url_env_var_name() {
        assert_eq!(
            BackendConfig::new("recetas", "http://x").url_env_var(),
            "RECETAS_SERVICE_URL"
        );
        assert_eq!(
            BackendConfig::new("meal-plans", "http://x").url_env_var(),
            "MEAL_PLANS_SERVICE_URL"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [timeouts]
            request_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.timeouts.request_secs, 10);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.backends.len(), 2);
    }

    #[test]
    fn test_backends_section_replaces_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[backends]]
            name = "orders"
            url = "http://orders:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.backends, vec![BackendConfig::new("orders", "http://orders:9000")]);
    }
}
