use publication_core::approval::GroupApprovalMode;
use publication_core::error::CoreError;
use publication_core::summary::PublicationContext;
use publication_core::table::TableOptions;
use publication_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `publications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publication {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub intro: String,
    pub import_from: Option<DbId>,
    pub obtain_student_approval: bool,
    pub obtain_teacher_approval: bool,
    pub group_approval: i16,
    pub created_at: Timestamp,
}

impl Publication {
    /// Domain view used by the approval aggregator.
    pub fn context(&self) -> Result<PublicationContext, CoreError> {
        Ok(PublicationContext {
            id: self.id,
            group_approval: GroupApprovalMode::from_code(self.group_approval)?,
            obtain_student_approval: self.obtain_student_approval,
            obtain_teacher_approval: self.obtain_teacher_approval,
        })
    }

    pub fn table_options(&self, can_approve: bool) -> TableOptions {
        TableOptions {
            can_approve,
            obtain_student_approval: self.obtain_student_approval,
            obtain_teacher_approval: self.obtain_teacher_approval,
        }
    }
}
