pub mod health;
pub mod publication;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /publications/{id}/group-files                         group files table
/// /publications/{id}/files/{file_id}/approval-summary    approval details of one file
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/publications", publication::router())
}
