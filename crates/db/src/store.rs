//! sqlx-backed [`ApprovalStore`].

use async_trait::async_trait;
use publication_core::approval::ApprovalVote;
use publication_core::error::CoreError;
use publication_core::summary::ApprovalStore;
use publication_core::types::DbId;

use crate::repositories::{GroupApprovalRepo, PublicationFileRepo};
use crate::DbPool;

/// Reads submission records and votes from Postgres.
#[derive(Clone)]
pub struct PgApprovalStore {
    pool: DbPool,
}

impl PgApprovalStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    async fn resolve_submission_record(
        &self,
        publication_id: DbId,
        file_id: DbId,
    ) -> Result<Option<DbId>, CoreError> {
        PublicationFileRepo::find_record_id(&self.pool, publication_id, file_id)
            .await
            .map_err(CoreError::collaborator)
    }

    async fn fetch_approval_votes(&self, record_id: DbId) -> Result<Vec<ApprovalVote>, CoreError> {
        let rows = GroupApprovalRepo::list_votes(&self.pool, record_id)
            .await
            .map_err(CoreError::collaborator)?;
        tracing::debug!(record_id, votes = rows.len(), "Fetched approval votes");
        Ok(rows.into_iter().map(ApprovalVote::from).collect())
    }

    async fn overall_approval_status(&self, record_id: DbId) -> Result<Option<i16>, CoreError> {
        PublicationFileRepo::student_approval(&self.pool, record_id)
            .await
            .map_err(CoreError::collaborator)
    }
}
