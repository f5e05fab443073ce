//! Route definitions for publication instances.

use axum::routing::get;
use axum::Router;

use crate::handlers::publication;
use crate::state::AppState;

/// Publication routes mounted at `/publications`.
///
/// ```text
/// GET /{id}/group-files                          -> get_group_files
/// GET /{id}/files/{file_id}/approval-summary     -> get_approval_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/group-files", get(publication::get_group_files))
        .route(
            "/{id}/files/{file_id}/approval-summary",
            get(publication::get_approval_summary),
        )
}
