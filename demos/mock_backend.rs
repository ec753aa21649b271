//! Mock backend service for trying the gateway locally.
//!
//! Run: cargo run --example mock_backend -- <port> <service>
//! e.g. `cargo run --example mock_backend -- 8001 recetas`

use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    let port: u16 = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(8001);
    let service = std::env::args().nth(2).unwrap_or_else(|| "recetas".to_string());

    let list_service = service.clone();
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route(
            &format!("/{}", service),
            get(move || {
                let service = list_service.clone();
                async move { Json(json!([{"id": 1, "nombre": format!("{} 1", service)}])) }
            })
            .post(|Json(body): Json<Value>| async move { (StatusCode::CREATED, Json(body)) }),
        )
        .route(
            &format!("/{}/{{id}}", service),
            get(|Path(id): Path<u32>| async move {
                if id == 1 {
                    (StatusCode::OK, Json(json!({"id": id})))
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"})))
                }
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Mock '{}' backend listening on http://{}", service, addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
