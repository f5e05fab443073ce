//! Liveness route, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and the schema is current, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Embedded migrations not yet applied; `None` when the database is unreachable.
    pub pending_migrations: Option<usize>,
}

/// GET /health
///
/// Answers 503 while degraded.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = publication_db::health_check(&state.pool).await.is_ok();
    let pending_migrations = if db_healthy {
        match publication_db::pending_migrations(&state.pool).await {
            Ok(count) => Some(count),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read migration state");
                None
            }
        }
    } else {
        None
    };

    let healthy = db_healthy && pending_migrations == Some(0);
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            pending_migrations,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
