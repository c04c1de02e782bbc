//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use daftar_store::StoreError;

use crate::AppState;

pub mod coding;
pub mod documents;
pub mod health;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(coding::routes())
        .merge(documents::routes())
        .merge(reports::routes())
}

/// Renders a store error as a JSON error body with the mapped status.
///
/// `error` carries the localized user-facing message; `code` is the
/// stable machine-readable identifier.
pub(crate) fn error_response(err: &StoreError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.message_fa(),
            "code": err.error_code()
        })),
    )
        .into_response()
}
