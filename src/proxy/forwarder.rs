//! Upstream request execution.
//!
//! # Responsibilities
//! - Send one request to the backend and await one response
//! - Enforce the per-request timeout
//! - Classify failures (connect / timeout / other)
//! - Re-encode the upstream JSON body with the upstream status
//!
//! # Design Decisions
//! - Exactly one attempt; nothing is retried
//! - A connect attempt that times out counts as a timeout
//! - Empty upstream bodies become `{}`; non-JSON bodies are internal errors

use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;

use crate::proxy::error::{error_chain, is_timeout, ProxyError};
use crate::proxy::request::ProxyRequest;

/// HTTP client shared by the forwarder and the health probes.
pub type HttpClient = Client<HttpConnector, Body>;

/// Outcome of one forwarded request.
pub type ProxyResult = Result<UpstreamResponse, ProxyError>;

/// Build a pooled HTTP/1.1 client with a bounded connect phase.
pub fn build_client(connect_timeout: Duration) -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(Some(connect_timeout));
    Client::builder(TokioExecutor::new()).build(connector)
}

/// A successful upstream response, body already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    /// Decode a raw upstream body. Empty bodies become `{}`.
    pub fn from_parts(status: StatusCode, body: &[u8]) -> ProxyResult {
        let body = if body.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_slice(body)
                .map_err(|e| ProxyError::Internal(format!("invalid JSON in upstream body: {}", e)))?
        };
        Ok(Self { status, body })
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Executes proxied requests against backends.
#[derive(Clone)]
pub struct Forwarder {
    client: HttpClient,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl Forwarder {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            client: build_client(connect_timeout),
            request_timeout,
            connect_timeout,
        }
    }

    /// Forward `request` to `service`, translating every failure into a
    /// classified [`ProxyError`].
    pub async fn forward(&self, service: &str, request: ProxyRequest) -> ProxyResult {
        let start = Instant::now();
        let method = request.method.clone();
        let uri = request.uri();

        let result = match time::timeout(self.request_timeout, self.round_trip(service, request)).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout {
                service: service.to_string(),
                timeout: self.request_timeout,
            }),
        };

        match &result {
            Ok(response) => tracing::debug!(
                service = %service,
                method = %method,
                uri = %uri,
                status = %response.status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream responded"
            ),
            Err(e) => tracing::warn!(
                service = %service,
                method = %method,
                uri = %uri,
                error_type = e.error_type(),
                error = %e,
                "Upstream request failed"
            ),
        }
        result
    }

    async fn round_trip(&self, service: &str, request: ProxyRequest) -> ProxyResult {
        let uri: Uri = request
            .uri()
            .parse()
            .map_err(|e| ProxyError::Internal(format!("invalid upstream url: {}", e)))?;

        let mut builder = Request::builder().method(request.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = request.headers;
        }
        let upstream_request = builder
            .body(Body::from(request.body))
            .map_err(|e| ProxyError::Internal(e.to_string()))?;

        let response = self
            .client
            .request(upstream_request)
            .await
            .map_err(|e| self.classify(service, e))?;

        let (parts, body) = response.into_parts();
        let bytes = read_body(body).await?;
        UpstreamResponse::from_parts(parts.status, &bytes)
    }

    fn classify(&self, service: &str, err: hyper_util::client::legacy::Error) -> ProxyError {
        if err.is_connect() {
            if is_timeout(&err) {
                ProxyError::Timeout {
                    service: service.to_string(),
                    timeout: self.connect_timeout,
                }
            } else {
                ProxyError::Unavailable {
                    service: service.to_string(),
                    reason: error_chain(&err),
                }
            }
        } else {
            ProxyError::Internal(format!("upstream request failed: {}", error_chain(&err)))
        }
    }
}

async fn read_body(body: hyper::body::Incoming) -> Result<Bytes, ProxyError> {
    axum::body::to_bytes(Body::new(body), usize::MAX)
        .await
        .map_err(|e| ProxyError::Internal(format!("failed to read upstream body: {}", e)))
}
