//! Chart-of-accounts coding routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use daftar_core::coding::{AccountNature, CodingLevel};
use daftar_shared::types::{ClassId, DetailId, GroupId, ProjectId, SubClassId};

use super::error_response;
use crate::AppState;

/// Creates the coding routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{project_id}/coding", get(get_tree))
        .route("/projects/{project_id}/coding", delete(delete_all))
        .route("/projects/{project_id}/coding/accounts", get(list_accounts))
        .route("/projects/{project_id}/coding/next-code", get(next_code))
        .route("/projects/{project_id}/coding/groups", post(create_group))
        .route(
            "/projects/{project_id}/coding/groups/{group_id}",
            patch(update_group).delete(delete_group),
        )
        .route("/projects/{project_id}/coding/classes", post(create_class))
        .route(
            "/projects/{project_id}/coding/classes/{class_id}",
            patch(update_class).delete(delete_class),
        )
        .route(
            "/projects/{project_id}/coding/subclasses",
            post(create_subclass),
        )
        .route(
            "/projects/{project_id}/coding/subclasses/{subclass_id}",
            patch(update_subclass).delete(delete_subclass),
        )
        .route("/projects/{project_id}/coding/details", post(create_detail))
        .route(
            "/projects/{project_id}/coding/details/{detail_id}",
            patch(update_detail).delete(delete_detail),
        )
        .route("/coding/import-sources", get(import_sources))
        .route("/projects/{project_id}/coding/import", post(import_coding))
}

/// Request body for creating a group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Single-digit group code.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Request body for renaming a group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    /// New display name.
    pub name: String,
}

/// Request body for creating a class.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    /// Parent group ID.
    pub group_id: Uuid,
    /// Single-digit class code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Nature: debit, credit, or debit_credit.
    pub nature: String,
}

/// Request body for updating a class.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    /// New display name.
    pub name: String,
    /// New nature, when changing it.
    pub nature: Option<String>,
}

/// Request body for creating a subclass.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubClassRequest {
    /// Parent class ID.
    pub class_id: Uuid,
    /// Two-digit subclass code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Whether detail accounts may attach (default: false).
    pub has_details: Option<bool>,
}

/// Request body for updating a subclass.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubClassRequest {
    /// New display name.
    pub name: String,
    /// New `has_details` flag, when changing it.
    pub has_details: Option<bool>,
}

/// Request body for creating a detail.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDetailRequest {
    /// Parent subclass ID.
    pub subclass_id: Uuid,
    /// Two-digit detail code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a detail.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailRequest {
    /// New display name.
    pub name: String,
    /// New description, replacing the old one.
    pub description: Option<String>,
}

/// Query parameters for the next-code suggestion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextCodeQuery {
    /// Level to suggest for: group, class, subclass, or detail.
    pub level: String,
    /// Parent node ID; required for every level but group.
    pub parent_id: Option<Uuid>,
}

/// Request body for importing coding from another project.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Project to copy the coding tree from.
    pub source_project_id: Uuid,
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message, "code": "INVALID_REQUEST" })),
    )
        .into_response()
}

/// GET `/projects/{project_id}/coding` - Full nested tree.
async fn get_tree(State(state): State<AppState>, Path(project_id): Path<Uuid>) -> impl IntoResponse {
    let view = state.coding.tree_view(ProjectId::from_uuid(project_id));
    (StatusCode::OK, Json(json!({ "groups": view }))).into_response()
}

/// DELETE `/projects/{project_id}/coding` - Drop the whole tree.
async fn delete_all(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    state.coding.delete_all(ProjectId::from_uuid(project_id));
    StatusCode::NO_CONTENT.into_response()
}

/// GET `/projects/{project_id}/coding/accounts` - Flat selectable accounts.
async fn list_accounts(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let index = state.coding.account_index(ProjectId::from_uuid(project_id));
    (
        StatusCode::OK,
        Json(json!({ "accounts": index.accounts() })),
    )
        .into_response()
}

/// GET `/projects/{project_id}/coding/next-code` - Next free code suggestion.
async fn next_code(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<NextCodeQuery>,
) -> impl IntoResponse {
    let project_id = ProjectId::from_uuid(project_id);
    let Some(level) = CodingLevel::parse(&query.level) else {
        return bad_request("سطح کدینگ نامعتبر است");
    };

    let suggestion = match level {
        CodingLevel::Group => Ok(state.coding.next_group_code(project_id)),
        CodingLevel::Class => match query.parent_id {
            Some(id) => state.coding.next_class_code(project_id, GroupId::from_uuid(id)),
            None => return bad_request("شناسه والد الزامی است"),
        },
        CodingLevel::SubClass => match query.parent_id {
            Some(id) => state
                .coding
                .next_subclass_code(project_id, ClassId::from_uuid(id)),
            None => return bad_request("شناسه والد الزامی است"),
        },
        CodingLevel::Detail => match query.parent_id {
            Some(id) => state
                .coding
                .next_detail_code(project_id, SubClassId::from_uuid(id)),
            None => return bad_request("شناسه والد الزامی است"),
        },
    };

    match suggestion {
        Ok(code) => (StatusCode::OK, Json(json!({ "code": code }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/projects/{project_id}/coding/groups` - Create a group.
async fn create_group(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateGroupRequest>,
) -> impl IntoResponse {
    match state
        .coding
        .create_group(ProjectId::from_uuid(project_id), &payload.code, &payload.name)
    {
        Ok(group) => (StatusCode::CREATED, Json(group)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to create group");
            error_response(&e)
        }
    }
}

/// PATCH `/projects/{project_id}/coding/groups/{group_id}` - Rename a group.
async fn update_group(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateGroupRequest>,
) -> impl IntoResponse {
    match state.coding.rename_group(
        ProjectId::from_uuid(project_id),
        GroupId::from_uuid(group_id),
        &payload.name,
    ) {
        Ok(group) => (StatusCode::OK, Json(group)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/projects/{project_id}/coding/groups/{group_id}` - Delete a group.
async fn delete_group(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.coding.delete_group(
        ProjectId::from_uuid(project_id),
        GroupId::from_uuid(group_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/projects/{project_id}/coding/classes` - Create a class.
async fn create_class(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateClassRequest>,
) -> impl IntoResponse {
    let Some(nature) = AccountNature::parse(&payload.nature) else {
        return bad_request("ماهیت حساب نامعتبر است");
    };

    match state.coding.create_class(
        ProjectId::from_uuid(project_id),
        GroupId::from_uuid(payload.group_id),
        &payload.code,
        &payload.name,
        nature,
    ) {
        Ok(class) => (StatusCode::CREATED, Json(class)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to create class");
            error_response(&e)
        }
    }
}

/// PATCH `/projects/{project_id}/coding/classes/{class_id}` - Update a class.
async fn update_class(
    State(state): State<AppState>,
    Path((project_id, class_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateClassRequest>,
) -> impl IntoResponse {
    let nature = match payload.nature.as_deref() {
        Some(s) => match AccountNature::parse(s) {
            Some(nature) => Some(nature),
            None => return bad_request("ماهیت حساب نامعتبر است"),
        },
        None => None,
    };

    match state.coding.update_class(
        ProjectId::from_uuid(project_id),
        ClassId::from_uuid(class_id),
        &payload.name,
        nature,
    ) {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/projects/{project_id}/coding/classes/{class_id}` - Delete a class.
async fn delete_class(
    State(state): State<AppState>,
    Path((project_id, class_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.coding.delete_class(
        ProjectId::from_uuid(project_id),
        ClassId::from_uuid(class_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/projects/{project_id}/coding/subclasses` - Create a subclass.
async fn create_subclass(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateSubClassRequest>,
) -> impl IntoResponse {
    match state.coding.create_subclass(
        ProjectId::from_uuid(project_id),
        ClassId::from_uuid(payload.class_id),
        &payload.code,
        &payload.name,
        payload.has_details.unwrap_or(false),
    ) {
        Ok(subclass) => (StatusCode::CREATED, Json(subclass)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to create subclass");
            error_response(&e)
        }
    }
}

/// PATCH `/projects/{project_id}/coding/subclasses/{subclass_id}` - Update a subclass.
async fn update_subclass(
    State(state): State<AppState>,
    Path((project_id, subclass_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateSubClassRequest>,
) -> impl IntoResponse {
    match state.coding.update_subclass(
        ProjectId::from_uuid(project_id),
        SubClassId::from_uuid(subclass_id),
        &payload.name,
        payload.has_details,
    ) {
        Ok(subclass) => (StatusCode::OK, Json(subclass)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/projects/{project_id}/coding/subclasses/{subclass_id}` - Delete a subclass.
async fn delete_subclass(
    State(state): State<AppState>,
    Path((project_id, subclass_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.coding.delete_subclass(
        ProjectId::from_uuid(project_id),
        SubClassId::from_uuid(subclass_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/projects/{project_id}/coding/details` - Create a detail.
async fn create_detail(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateDetailRequest>,
) -> impl IntoResponse {
    match state.coding.create_detail(
        ProjectId::from_uuid(project_id),
        SubClassId::from_uuid(payload.subclass_id),
        &payload.code,
        &payload.name,
        payload.description,
    ) {
        Ok(detail) => (StatusCode::CREATED, Json(detail)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to create detail");
            error_response(&e)
        }
    }
}

/// PATCH `/projects/{project_id}/coding/details/{detail_id}` - Update a detail.
async fn update_detail(
    State(state): State<AppState>,
    Path((project_id, detail_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateDetailRequest>,
) -> impl IntoResponse {
    match state.coding.update_detail(
        ProjectId::from_uuid(project_id),
        DetailId::from_uuid(detail_id),
        &payload.name,
        payload.description,
    ) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/projects/{project_id}/coding/details/{detail_id}` - Delete a detail.
async fn delete_detail(
    State(state): State<AppState>,
    Path((project_id, detail_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.coding.delete_detail(
        ProjectId::from_uuid(project_id),
        DetailId::from_uuid(detail_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/coding/import-sources` - Projects with coding to copy from.
async fn import_sources(State(state): State<AppState>) -> impl IntoResponse {
    let sources = state.coding.import_sources();
    (StatusCode::OK, Json(json!({ "projects": sources }))).into_response()
}

/// POST `/projects/{project_id}/coding/import` - Copy coding from another project.
async fn import_coding(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<ImportRequest>,
) -> impl IntoResponse {
    let source = ProjectId::from_uuid(payload.source_project_id);
    let target = ProjectId::from_uuid(project_id);

    match state.coding.import(source, target) {
        Ok(groups) => {
            info!(%source, %target, "coding imported");
            (StatusCode::OK, Json(json!({ "importedGroups": groups }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to import coding");
            error_response(&e)
        }
    }
}
