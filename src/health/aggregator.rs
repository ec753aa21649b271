//! Composite health checking.
//!
//! # Responsibilities
//! - Probe every registered backend's health path
//! - Run probes concurrently, one task per backend, each with its own timeout
//! - Fold the outcomes into a single HealthSummary

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header::USER_AGENT, Method, Request, StatusCode};
use futures_util::future::join_all;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::report::{HealthReport, HealthSummary, OverallStatus, ProbeOutcome};
use crate::observability::metrics;
use crate::proxy::error::{error_chain, is_timeout};
use crate::proxy::{build_client, HttpClient};
use crate::routing::BackendRegistry;

const PROBE_USER_AGENT: &str = "service-gateway-health-check";

/// Probes all backends on demand.
#[derive(Clone)]
pub struct HealthAggregator {
    registry: Arc<BackendRegistry>,
    client: HttpClient,
    path: String,
    timeout: Duration,
}

impl HealthAggregator {
    pub fn new(registry: Arc<BackendRegistry>, path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            registry,
            client: build_client(timeout),
            path: path.into(),
            timeout,
        }
    }

    pub fn from_config(registry: Arc<BackendRegistry>, config: &HealthCheckConfig) -> Self {
        Self::new(registry, config.path.clone(), config.timeout())
    }

    /// Probe every backend concurrently and wait for all of them.
    pub async fn check_all(&self) -> HealthSummary {
        let start = Instant::now();

        let (names, tasks): (Vec<_>, Vec<_>) = self
            .registry
            .iter()
            .map(|backend| {
                let client = self.client.clone();
                let url = backend.url_for(&self.path);
                let timeout = self.timeout;
                let task = tokio::spawn(async move { probe(&client, &url, timeout).await });
                (backend.name.clone(), task)
            })
            .unzip();

        let results = join_all(tasks).await;

        let report: HealthReport = names
            .into_iter()
            .zip(results)
            .map(|(name, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    tracing::error!(service = %name, error = %e, "Health probe task failed");
                    ProbeOutcome::unhealthy(format!("probe task failed: {}", e))
                });
                if !outcome.is_healthy() {
                    tracing::warn!(service = %name, outcome = %outcome, "Backend unhealthy");
                }
                metrics::record_backend_health(&name, outcome.is_healthy());
                (name, outcome)
            })
            .collect();

        let summary = HealthSummary::from(report);
        match summary.status {
            OverallStatus::Healthy => tracing::debug!(
                backends = summary.services.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Health check complete"
            ),
            OverallStatus::Degraded => tracing::info!(
                backends = summary.services.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Health check complete: degraded"
            ),
        }
        summary
    }
}

/// Probe one health URL. Only HTTP 200 counts as healthy.
pub async fn probe(client: &HttpClient, url: &str, timeout: Duration) -> ProbeOutcome {
    let request = match Request::builder()
        .method(Method::GET)
        .uri(url)
        .header(USER_AGENT, PROBE_USER_AGENT)
        .body(Body::empty())
    {
        Ok(req) => req,
        Err(e) => return ProbeOutcome::unhealthy(format!("invalid probe request: {}", e)),
    };

    match time::timeout(timeout, client.request(request)).await {
        Ok(Ok(response)) if response.status() == StatusCode::OK => ProbeOutcome::Healthy,
        Ok(Ok(response)) => ProbeOutcome::unhealthy(format!("status {}", response.status().as_u16())),
        Ok(Err(e)) if is_timeout(&e) => ProbeOutcome::unhealthy("timeout"),
        Ok(Err(e)) => ProbeOutcome::unhealthy(error_chain(&e)),
        Err(_) => ProbeOutcome::unhealthy("timeout"),
    }
}
