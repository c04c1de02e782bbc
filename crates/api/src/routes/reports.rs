//! Financial report routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use daftar_core::reports::{ReportService, ReportType};
use daftar_shared::types::ProjectId;

use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/projects/{project_id}/reports/{report_type}",
        get(get_report),
    )
}

/// GET `/projects/{project_id}/reports/{report_type}` - Build a report.
async fn get_report(
    State(state): State<AppState>,
    Path((project_id, report_type)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    let Some(report_type) = ReportType::parse(&report_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "نوع گزارش نامعتبر است", "code": "INVALID_REPORT_TYPE" })),
        )
            .into_response();
    };

    let project_id = ProjectId::from_uuid(project_id);
    let index = state.coding.account_index(project_id);
    let documents = state.documents.list(project_id);
    let report = ReportService::build(report_type, &index, &documents);

    (StatusCode::OK, Json(report)).into_response()
}
