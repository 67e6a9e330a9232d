//! Route definitions for the `/checks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::checks;
use crate::state::AppState;

/// Routes mounted at `/checks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(checks::list).post(checks::create))
        .route("/summary", get(checks::summary))
        .route(
            "/{id}",
            get(checks::get_by_id)
                .put(checks::update)
                .delete(checks::delete),
        )
        .route("/{id}/next-due", get(checks::next_due))
        .route("/{id}/checklist/toggle", post(checks::toggle_by_label))
        .route("/{id}/checklist/{item_id}/toggle", post(checks::toggle_item))
        .route("/{id}/inspections", post(checks::log_inspection))
}
