pub mod checks;
pub mod health;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /checks                                     list, create
/// /checks/summary                             status counts + alert feed
/// /checks/{id}                                get, replace, soft delete
/// /checks/{id}/next-due                       suggested next due date
/// /checks/{id}/checklist/toggle               toggle by label
/// /checks/{id}/checklist/{item_id}/toggle     toggle by item id
/// /checks/{id}/inspections                    log inspection
///
/// /trash/checks                               list trashed
/// /trash/checks/{id}/restore                  restore
/// /trash/checks/{id}/purge                    permanent delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/checks", checks::router())
        .nest("/trash", trash::router())
}
