//! Handlers for the group files table and per-file approval details.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use publication_core::error::CoreError;
use publication_core::summary::{ApprovalAggregator, ApprovalSummary};
use publication_core::table::{
    group_columns, render_row, status_symbol, ColumnDescriptor, GroupFile, GroupRow, RenderContext,
};
use publication_core::tooltip::DetailsTooltip;
use publication_core::types::{DbId, Member};
use publication_db::models::publication::Publication;
use publication_db::repositories::{GroupRepo, PublicationFileRepo, PublicationRepo};
use publication_db::{DbPool, PgApprovalStore};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the group files table.
#[derive(Debug, Deserialize)]
pub struct GroupFilesQuery {
    /// Render the approval columns.
    #[serde(default)]
    pub approver: bool,
}

/// A rendered group row.
#[derive(Debug, Serialize)]
pub struct RenderedRow {
    pub group_id: DbId,
    pub file_count: i64,
    pub cells: Vec<String>,
}

/// Response payload of the group files table.
#[derive(Debug, Serialize)]
pub struct GroupFilesTable {
    pub publication_id: DbId,
    /// Label for the approval status widget.
    pub approval_mode: &'static str,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RenderedRow>,
}

/// Response payload of a single file's approval details.
#[derive(Debug, Serialize)]
pub struct ApprovalDetails {
    pub summary: ApprovalSummary,
    pub approval_mode: &'static str,
    pub attributes: BTreeMap<&'static str, String>,
    pub html: String,
}

async fn find_publication(pool: &DbPool, id: DbId) -> AppResult<Publication> {
    PublicationRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Publication",
                id,
            }
            .into()
        })
}

/// GET /api/v1/publications/{id}/group-files
///
/// Render the group files table: one row per group of the publication,
/// restricted to the imported assignment's team grouping.
pub async fn get_group_files(
    State(state): State<AppState>,
    Path(publication_id): Path<DbId>,
    Query(query): Query<GroupFilesQuery>,
) -> AppResult<impl IntoResponse> {
    let publication = find_publication(&state.pool, publication_id).await?;
    let context = publication.context()?;
    let options = publication.table_options(query.approver);
    let columns = group_columns(&options);

    let grouping_id = PublicationRepo::team_grouping_id(&state.pool, &publication).await?;
    let groups = GroupRepo::list_group_rows(&state.pool, &publication, grouping_id).await?;

    let store = PgApprovalStore::new(state.pool.clone());
    let aggregator = ApprovalAggregator::new(&store, state.display.as_ref(), state.config.vote_policy);
    let ctx = RenderContext {
        display: state.display.as_ref(),
        options: &options,
    };

    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        let members: Vec<Member> = GroupRepo::list_members(&state.pool, group.id)
            .await?
            .into_iter()
            .map(Member::from)
            .collect();

        let mut files = Vec::new();
        if group.file_count > 0 {
            for record in PublicationFileRepo::list_for_group(&state.pool, publication.id, group.id).await? {
                let file = record.stored_file();
                let summary = aggregator.summarize(&context, &file).await?;
                files.push(GroupFile {
                    file,
                    teacher_approval: record.teacher_approval,
                    summary,
                });
            }
        }

        let row = GroupRow {
            group_id: group.id,
            group_name: group.group_name,
            members,
            files,
            time_modified: group.time_modified,
        };
        rows.push(RenderedRow {
            group_id: row.group_id,
            file_count: group.file_count,
            cells: render_row(&columns, &row, &ctx)?,
        });
    }

    tracing::debug!(
        publication_id,
        grouping_id,
        rows = rows.len(),
        approver = query.approver,
        "Rendered group files table"
    );

    Ok(Json(DataResponse {
        data: GroupFilesTable {
            publication_id,
            approval_mode: context.group_approval.label(),
            columns,
            rows,
        },
    }))
}

/// GET /api/v1/publications/{id}/files/{file_id}/approval-summary
///
/// Approval details of one submitted file, with the tooltip attributes.
pub async fn get_approval_summary(
    State(state): State<AppState>,
    Path((publication_id, file_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let publication = find_publication(&state.pool, publication_id).await?;
    let context = publication.context()?;

    let record = PublicationFileRepo::find_in_publication(&state.pool, publication_id, file_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PublicationFile",
            id: file_id,
        })?;

    let store = PgApprovalStore::new(state.pool.clone());
    let summary = ApprovalAggregator::new(&store, state.display.as_ref(), state.config.vote_policy)
        .summarize(&context, &record.stored_file())
        .await?;

    let tooltip = DetailsTooltip::wrap(status_symbol(summary.overall()), &summary)?;
    let attributes = tooltip.attributes().iter().cloned().collect();
    let html = tooltip.to_html();

    Ok(Json(DataResponse {
        data: ApprovalDetails {
            summary,
            approval_mode: context.group_approval.label(),
            attributes,
            html,
        },
    }))
}
