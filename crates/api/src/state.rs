use std::sync::Arc;

use clubcare_core::checks::CheckEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the engine holds its store and clock behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Check lifecycle engine bound to the configured store and clock.
    pub engine: CheckEngine,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
