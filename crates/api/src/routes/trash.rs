//! Route definitions for the `/trash` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/trash`.
///
/// ```text
/// GET    /checks                  -> list_trashed
/// POST   /checks/{id}/restore     -> restore
/// DELETE /checks/{id}/purge       -> purge
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checks", get(trash::list_trashed))
        .route("/checks/{id}/restore", post(trash::restore))
        .route("/checks/{id}/purge", delete(trash::purge))
}
