//! Journal document routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use daftar_core::coding::AccountIndex;
use daftar_core::document::{DocumentDraft, DocumentEntry, DocumentStatus};
use daftar_shared::types::{DocumentId, ProjectId};
use daftar_store::StoreError;

use super::error_response;
use crate::AppState;

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}/documents",
            get(list_documents).post(create_document),
        )
        .route(
            "/projects/{project_id}/documents/{document_id}",
            get(get_document)
                .put(update_document)
                .delete(delete_document),
        )
        .route(
            "/projects/{project_id}/documents/{document_id}/status",
            patch(change_status),
        )
}

/// One entry row in a document payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    /// Full account code.
    pub account_code: String,
    /// Display name fallback for codes absent from the coding tree.
    pub account_name: Option<String>,
    /// Free-text row description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Option<Decimal>,
    /// Credit amount.
    pub credit: Option<Decimal>,
}

/// Request body for creating or updating a document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    /// User-entered document number.
    pub number: String,
    /// Document date.
    pub date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Entry rows, blanks included.
    pub entries: Vec<EntryPayload>,
    /// Status to save with (create only, default: temporary).
    pub status: Option<String>,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// Target status: temporary or permanent.
    pub status: String,
}

/// Query parameters for listing documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    /// Filter by status.
    pub status: Option<String>,
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message, "code": "INVALID_REQUEST" })),
    )
        .into_response()
}

/// Enriches payload rows against the account index and applies the
/// nature-checked amount setters.
///
/// Rows whose code is known take their name and nature from the index;
/// unknown codes keep the payload name and stay nature-unchecked.
fn build_entries(
    index: &AccountIndex,
    payloads: Vec<EntryPayload>,
) -> Result<Vec<DocumentEntry>, StoreError> {
    payloads
        .into_iter()
        .map(|payload| {
            let (name, nature) = match index.resolve(&payload.account_code) {
                Some(account) => (account.name.clone(), Some(account.nature)),
                None => (payload.account_name.unwrap_or_default(), None),
            };
            let mut entry = DocumentEntry::from_parts(
                payload.account_code,
                name,
                payload.description.unwrap_or_default(),
                Decimal::ZERO,
                Decimal::ZERO,
                nature,
            );
            entry.set_debit(payload.debit.unwrap_or(Decimal::ZERO))?;
            entry.set_credit(payload.credit.unwrap_or(Decimal::ZERO))?;
            Ok(entry)
        })
        .collect()
}

fn build_draft(
    state: &AppState,
    project_id: ProjectId,
    payload: DocumentRequest,
) -> Result<DocumentDraft, StoreError> {
    let index = state.coding.account_index(project_id);
    let entries = build_entries(&index, payload.entries)?;
    Ok(DocumentDraft {
        number: payload.number,
        date: payload.date,
        description: payload.description.unwrap_or_default(),
        entries,
    })
}

/// GET `/projects/{project_id}/documents` - List documents.
async fn list_documents(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<ListDocumentsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref() {
        Some(s) => match DocumentStatus::parse(s) {
            Some(status) => Some(status),
            None => return bad_request("وضعیت سند نامعتبر است"),
        },
        None => None,
    };

    let documents: Vec<_> = state
        .documents
        .list(ProjectId::from_uuid(project_id))
        .into_iter()
        .filter(|d| status.is_none_or(|s| d.status == s))
        .collect();
    (StatusCode::OK, Json(json!({ "documents": documents }))).into_response()
}

/// POST `/projects/{project_id}/documents` - Validate and save a document.
async fn create_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<DocumentRequest>,
) -> impl IntoResponse {
    let project_id = ProjectId::from_uuid(project_id);
    let status = match payload.status.as_deref() {
        Some(s) => match DocumentStatus::parse(s) {
            Some(status) => status,
            None => return bad_request("وضعیت سند نامعتبر است"),
        },
        None => DocumentStatus::Temporary,
    };

    let draft = match build_draft(&state, project_id, payload) {
        Ok(draft) => draft,
        Err(e) => return error_response(&e),
    };

    match state.documents.create(project_id, draft, status) {
        Ok(document) => {
            info!(%project_id, document_id = %document.id, "document created");
            (StatusCode::CREATED, Json(document)).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to create document");
            error_response(&e)
        }
    }
}

/// GET `/projects/{project_id}/documents/{document_id}` - Fetch one document.
async fn get_document(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.documents.get(
        ProjectId::from_uuid(project_id),
        DocumentId::from_uuid(document_id),
    ) {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/projects/{project_id}/documents/{document_id}` - Replace a document's content.
async fn update_document(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DocumentRequest>,
) -> impl IntoResponse {
    let project_id = ProjectId::from_uuid(project_id);
    let draft = match build_draft(&state, project_id, payload) {
        Ok(draft) => draft,
        Err(e) => return error_response(&e),
    };

    match state
        .documents
        .update(project_id, DocumentId::from_uuid(document_id), draft)
    {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to update document");
            error_response(&e)
        }
    }
}

/// PATCH `/projects/{project_id}/documents/{document_id}/status` - Change status.
async fn change_status(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<StatusRequest>,
) -> impl IntoResponse {
    let Some(status) = DocumentStatus::parse(&payload.status) else {
        return bad_request("وضعیت سند نامعتبر است");
    };

    match state.documents.set_status(
        ProjectId::from_uuid(project_id),
        DocumentId::from_uuid(document_id),
        status,
    ) {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/projects/{project_id}/documents/{document_id}` - Delete a document.
async fn delete_document(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.documents.delete(
        ProjectId::from_uuid(project_id),
        DocumentId::from_uuid(document_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}
