//! Handlers for the `/checks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use clubcare_core::checks::{
    CheckFilter, CreateCheck, ItemRef, PeriodicCheck, ReplaceCheck, StatusSummary,
};
use clubcare_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /checks/{id}/checklist/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleByLabel {
    pub label: String,
}

/// Body of `POST /checks/{id}/inspections`.
#[derive(Debug, Default, Deserialize)]
pub struct LogInspection {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload of `GET /checks/{id}/next-due`.
#[derive(Debug, Serialize)]
pub struct NextDue {
    pub check_id: DbId,
    pub current_due_date: NaiveDate,
    /// `None` when the date would overflow the calendar.
    pub suggested_due_date: Option<NaiveDate>,
}

/// GET /api/v1/checks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<CheckFilter>,
) -> AppResult<Json<DataResponse<Vec<PeriodicCheck>>>> {
    let checks = state.engine.list_checks(&user.actor(), &filter).await?;
    Ok(Json(DataResponse { data: checks }))
}

/// GET /api/v1/checks/summary
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<CheckFilter>,
) -> AppResult<Json<DataResponse<StatusSummary>>> {
    let summary = state.engine.status_summary(&user.actor(), &filter).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/checks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCheck>,
) -> AppResult<(StatusCode, Json<DataResponse<PeriodicCheck>>)> {
    let check = state.engine.create_check(&user.actor(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: check })))
}

/// GET /api/v1/checks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PeriodicCheck>>> {
    let check = state.engine.get_check(&user.actor(), id).await?;
    Ok(Json(DataResponse { data: check }))
}

/// PUT /api/v1/checks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceCheck>,
) -> AppResult<Json<DataResponse<PeriodicCheck>>> {
    let check = state.engine.edit_check(&user.actor(), id, input).await?;
    Ok(Json(DataResponse { data: check }))
}

/// DELETE /api/v1/checks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.soft_delete_check(&user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/checks/{id}/next-due
pub async fn next_due(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NextDue>>> {
    let check = state.engine.get_check(&user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: NextDue {
            check_id: check.id,
            current_due_date: check.next_due_date,
            suggested_due_date: check.suggested_next_due_date(),
        },
    }))
}

/// POST /api/v1/checks/{id}/checklist/{item_id}/toggle
pub async fn toggle_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(DbId, Uuid)>,
) -> AppResult<Json<DataResponse<PeriodicCheck>>> {
    let check = state
        .engine
        .toggle_checklist_item(&user.actor(), id, ItemRef::Id(item_id))
        .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/checks/{id}/checklist/toggle
pub async fn toggle_by_label(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ToggleByLabel>,
) -> AppResult<Json<DataResponse<PeriodicCheck>>> {
    if input.label.trim().is_empty() {
        return Err(AppError::BadRequest("label must not be empty".into()));
    }
    let check = state
        .engine
        .toggle_checklist_item(&user.actor(), id, ItemRef::Label(input.label))
        .await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/checks/{id}/inspections
pub async fn log_inspection(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<LogInspection>,
) -> AppResult<(StatusCode, Json<DataResponse<PeriodicCheck>>)> {
    let check = state
        .engine
        .log_inspection(&user.actor(), id, input.notes)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: check })))
}
