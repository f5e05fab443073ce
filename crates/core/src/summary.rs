//! Group approval aggregation for a single submitted file.
//!
//! Resolves the submission record, fetches the member votes, buckets them
//! and attaches the authoritative overall status. The result is plain data;
//! markup is produced separately by [`crate::tooltip`].

use async_trait::async_trait;
use serde::Serialize;

use crate::approval::{ApprovalVote, GroupApprovalMode, OverallStatus, StatusFlags, VoteBucket, VotePolicy};
use crate::display::{DisplayFormatter, NO_TIME};
use crate::error::CoreError;
use crate::types::{DbId, StoredFile};

/// Read access to submission records and votes.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Internal submission record id for a file in a publication, if any.
    async fn resolve_submission_record(
        &self,
        publication_id: DbId,
        file_id: DbId,
    ) -> Result<Option<DbId>, CoreError>;

    /// Member votes for a submission record, in display order.
    async fn fetch_approval_votes(&self, record_id: DbId) -> Result<Vec<ApprovalVote>, CoreError>;

    /// Raw overall student approval code of a submission record.
    async fn overall_approval_status(&self, record_id: DbId) -> Result<Option<i16>, CoreError>;
}

/// The publication instance a summary is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationContext {
    pub id: DbId,
    pub group_approval: GroupApprovalMode,
    pub obtain_student_approval: bool,
    pub obtain_teacher_approval: bool,
}

/// One member line in the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalEntry {
    pub name: String,
    pub time: String,
}

/// Per-member approval detail of one file plus its overall status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalSummary {
    pub filename: String,
    pub approved: Vec<ApprovalEntry>,
    pub rejected: Vec<ApprovalEntry>,
    pub pending: Vec<ApprovalEntry>,
    pub status: StatusFlags,
}

impl ApprovalSummary {
    pub fn overall(&self) -> OverallStatus {
        if self.status.approved {
            OverallStatus::Approved
        } else if self.status.rejected {
            OverallStatus::Rejected
        } else {
            OverallStatus::Pending
        }
    }

    pub fn member_count(&self) -> usize {
        self.approved.len() + self.rejected.len() + self.pending.len()
    }
}

/// Builds [`ApprovalSummary`] values from injected collaborators.
pub struct ApprovalAggregator<'a> {
    store: &'a dyn ApprovalStore,
    display: &'a dyn DisplayFormatter,
    policy: VotePolicy,
}

impl<'a> ApprovalAggregator<'a> {
    pub fn new(store: &'a dyn ApprovalStore, display: &'a dyn DisplayFormatter, policy: VotePolicy) -> Self {
        Self { store, display, policy }
    }

    /// Summarize the approval state of `file` within `publication`.
    ///
    /// Fails with [`CoreError::NotFound`] when the file has no submission
    /// record in this publication.
    pub async fn summarize(
        &self,
        publication: &PublicationContext,
        file: &StoredFile,
    ) -> Result<ApprovalSummary, CoreError> {
        let record_id = self
            .store
            .resolve_submission_record(publication.id, file.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "PublicationFile",
                id: file.id,
            })?;

        let votes = self.store.fetch_approval_votes(record_id).await?;

        let mut approved = Vec::new();
        let mut rejected = Vec::new();
        let mut pending = Vec::new();

        for vote in &votes {
            let bucket = match VoteBucket::classify(record_id, vote.member.id, vote.approval) {
                Ok(bucket) => bucket,
                Err(err) if self.policy == VotePolicy::Lenient => {
                    tracing::warn!(
                        record_id,
                        member_id = vote.member.id,
                        error = %err,
                        "Skipping malformed approval vote"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };

            let name = self.display.display_name(&vote.member);
            match bucket {
                VoteBucket::Pending => pending.push(ApprovalEntry {
                    name,
                    time: NO_TIME.to_string(),
                }),
                VoteBucket::Rejected => rejected.push(ApprovalEntry {
                    name,
                    time: self.vote_time(vote),
                }),
                VoteBucket::Approved => approved.push(ApprovalEntry {
                    name,
                    time: self.vote_time(vote),
                }),
            }
        }

        let code = self.store.overall_approval_status(record_id).await?;
        let status = OverallStatus::from_code(code);

        let total = approved.len() + rejected.len() + pending.len();
        let derived = publication
            .group_approval
            .derive(approved.len(), rejected.len(), total);
        if derived != status {
            tracing::warn!(
                publication_id = publication.id,
                record_id,
                stored = ?status,
                derived = ?derived,
                "Stored student approval disagrees with member votes"
            );
        }

        tracing::debug!(
            publication_id = publication.id,
            record_id,
            approved = approved.len(),
            rejected = rejected.len(),
            pending = pending.len(),
            "Built approval summary"
        );

        Ok(ApprovalSummary {
            filename: file.filename.clone(),
            approved,
            rejected,
            pending,
            status: status.flags(),
        })
    }

    fn vote_time(&self, vote: &ApprovalVote) -> String {
        vote.approved_at
            .map(|at| self.display.date_time(at))
            .unwrap_or_else(|| NO_TIME.to_string())
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
