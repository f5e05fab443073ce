//! Repository for the `publication_group_approvals` table.

use publication_core::types::DbId;
use sqlx::PgPool;

use crate::models::group_approval::{ApprovalVoteRow, UpsertGroupApproval};

/// Provides access to member votes on group files.
pub struct GroupApprovalRepo;

impl GroupApprovalRepo {
    /// Every member of the file's group with their vote.
    ///
    /// Members who never voted appear with a null approval.
    pub async fn list_votes(pool: &PgPool, record_id: DbId) -> Result<Vec<ApprovalVoteRow>, sqlx::Error> {
        sqlx::query_as::<_, ApprovalVoteRow>(
            "SELECT
                u.id AS user_id,
                u.first_name,
                u.last_name,
                ga.approval,
                ga.approved_at
             FROM publication_files pf
             JOIN group_members gm ON gm.group_id = pf.user_id
             JOIN users u ON u.id = gm.user_id
             LEFT JOIN publication_group_approvals ga
                ON ga.file_id = pf.id AND ga.user_id = u.id
             WHERE pf.id = $1
             ORDER BY u.last_name ASC, u.first_name ASC, u.id ASC",
        )
        .bind(record_id)
        .fetch_all(pool)
        .await
    }

    /// Record a member's vote, replacing an earlier one.
    ///
    /// `approved_at` is set to now for decided votes and cleared for pending.
    pub async fn upsert(pool: &PgPool, input: &UpsertGroupApproval) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO publication_group_approvals (file_id, user_id, approval, approved_at)
             VALUES ($1, $2, $3, CASE WHEN $3::SMALLINT IS NULL THEN NULL ELSE now() END)
             ON CONFLICT ON CONSTRAINT uq_publication_group_approvals_file_user
             DO UPDATE SET approval = EXCLUDED.approval, approved_at = EXCLUDED.approved_at",
        )
        .bind(input.file_id)
        .bind(input.user_id)
        .bind(input.approval)
        .execute(pool)
        .await?;
        Ok(())
    }
}
