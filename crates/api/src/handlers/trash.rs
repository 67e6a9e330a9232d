//! Handlers for the recycle bin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubcare_core::checks::PeriodicCheck;
use clubcare_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/trash/checks
pub async fn list_trashed(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PeriodicCheck>>>> {
    let checks = state.engine.list_trashed(&user.actor()).await?;
    Ok(Json(DataResponse { data: checks }))
}

/// POST /api/v1/trash/checks/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PeriodicCheck>>> {
    let check = state.engine.restore_check(&user.actor(), id).await?;
    Ok(Json(DataResponse { data: check }))
}

/// DELETE /api/v1/trash/checks/{id}/purge
pub async fn purge(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .engine
        .permanently_delete_check(&user.actor(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
