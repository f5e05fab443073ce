use publication_core::types::{DbId, Member, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Aggregated group row of the group files table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupFilesRow {
    pub id: DbId,
    pub group_name: String,
    pub file_count: i64,
    /// Sum of the student approval codes of the group's files.
    pub student_approval: Option<i64>,
    pub time_modified: Option<Timestamp>,
}

/// A group member joined with the user's names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupMemberRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

impl From<GroupMemberRow> for Member {
    fn from(row: GroupMemberRow) -> Self {
        Member {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}
