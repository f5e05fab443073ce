use std::sync::Arc;

use publication_core::display::StrftimeDisplay;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: publication_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Name and date formatter built from `config.datetime_format`.
    pub display: Arc<StrftimeDisplay>,
}
