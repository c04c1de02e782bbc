//! HTTP API layer with Axum routes.
//!
//! This crate provides the REST routes for the coding tree, the
//! account index, journal documents, and reports.

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use daftar_store::{CodingStore, DocumentStore};

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Chart-of-accounts store.
    pub coding: Arc<CodingStore>,
    /// Journal document store.
    pub documents: Arc<DocumentStore>,
}

impl AppState {
    /// Creates fresh application state with empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/accounting", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
