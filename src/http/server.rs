//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Dispatch `/api/...` requests through routing and the forwarder
//! - Serve the composite health view and the route listing

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::health::{HealthAggregator, HealthSummary};
use crate::http::request::{request_id, UuidRequestId};
use crate::http::response::GatewayInfo;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::proxy::{Forwarder, ProxyError, ProxyRequest};
use crate::routing::{BackendRegistry, RegistryError, Router as ProxyRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
    pub health: HealthAggregator,
    pub info: Arc<GatewayInfo>,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build all subsystems from a validated configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(BackendRegistry::from_config(&config.backends)?);
        let info = Arc::new(GatewayInfo::from_registry(&registry));
        let health = HealthAggregator::from_config(registry.clone(), &config.health_check);
        let forwarder = Forwarder::new(config.timeouts.request(), config.timeouts.connect());

        Ok(Self {
            router: Arc::new(ProxyRouter::new(registry)),
            forwarder,
            health,
            info,
            max_body_bytes: config.listener.max_body_bytes,
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, RegistryError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let max_body_bytes = state.max_body_bytes;
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route(
                "/api/{*path}",
                get(proxy_handler)
                    .post(proxy_handler)
                    .put(proxy_handler)
                    .delete(proxy_handler),
            )
            .fallback(not_found_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(max_body_bytes)),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backends = self.config.backends.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn root_handler(State(state): State<AppState>) -> Json<GatewayInfo> {
    Json(state.info.as_ref().clone())
}

/// Always 200; the verdict is carried in the body.
async fn health_handler(State(state): State<AppState>) -> Json<HealthSummary> {
    Json(state.health.check_all().await)
}

async fn not_found_handler(request: Request<Body>) -> Response {
    ProxyError::NoRoute {
        path: request.uri().path().to_string(),
    }
    .into_response()
}

/// Main proxy handler.
/// Resolves the service, reads the body, and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Proxying request"
    );

    let (service, url) = match state.router.resolve(&path) {
        Some(target) => (target.backend.name.clone(), target.upstream_url()),
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(method.as_str(), 404, "none", start_time);
            return ProxyError::NoRoute { path }.into_response();
        }
    };

    let query = request.uri().query().map(str::to_owned);
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            let response = ProxyError::InvalidRequest(e.to_string()).into_response();
            metrics::record_request(method.as_str(), response.status().as_u16(), &service, start_time);
            return response;
        }
    };

    let proxy_request = ProxyRequest::new(parts.method, url, parts.headers, body, query.as_deref());
    let response = match state.forwarder.forward(&service, proxy_request).await {
        Ok(upstream) => upstream.into_response(),
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                service = %service,
                error_type = err.error_type(),
                "Returning gateway error"
            );
            err.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), &service, start_time);
    response
}
