//! Health probe endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health probe response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Name of the service answering the probe.
    pub service: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
}

/// Reports the accounting service as up.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "daftar-accounting",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health probe route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
