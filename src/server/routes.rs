use std::time::Instant;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `GET /health`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String
}

/// Builds the service routes.
///
/// | Method | Path      | Description    |
/// |--------|-----------|----------------|
/// | GET    | `/health` | Liveness probe |
///
/// Any other method on `/health` gets 405, `HEAD` included.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health).head(get_only))
        .layer(from_fn(log_requests))
}

/// Reports that the process is up. Says nothing about downstream readiness.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

//NOTE: axum answers HEAD with the GET handler unless HEAD is routed explicitly
async fn get_only() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let timer = Instant::now();

    let response = next.run(request).await;

    info!("{} {} {} {:?}", method, path, response.status().as_u16(), timer.elapsed());

    response
}
