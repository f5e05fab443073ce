use publication_core::approval::ApprovalVote;
use publication_core::types::{DbId, Member, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A group member of a file's group, with that member's vote if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalVoteRow {
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub approval: Option<i16>,
    pub approved_at: Option<Timestamp>,
}

impl From<ApprovalVoteRow> for ApprovalVote {
    fn from(row: ApprovalVoteRow) -> Self {
        ApprovalVote {
            member: Member {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            approval: row.approval,
            approved_at: row.approved_at,
        }
    }
}

/// DTO for recording or changing a member's vote.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertGroupApproval {
    pub file_id: DbId,
    pub user_id: DbId,
    pub approval: Option<i16>,
}
