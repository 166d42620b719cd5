//! Liveness and Prometheus scrape endpoints.

use axum::{http::header, response::IntoResponse, Json};

use crate::metrics;
use crate::types::HealthResponse;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Current metric values in the Prometheus text format.
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        metrics::encode_metrics(),
    )
}
