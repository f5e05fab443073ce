//! Repository for the `publications` table.

use publication_core::types::DbId;
use sqlx::PgPool;

use crate::models::publication::Publication;

/// Column list for publications queries.
const COLUMNS: &str = "id, course_id, name, intro, import_from, obtain_student_approval, \
    obtain_teacher_approval, group_approval, created_at";

/// Provides read operations for publication instances.
pub struct PublicationRepo;

impl PublicationRepo {
    /// Find a publication by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publications WHERE id = $1");
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Team-submission grouping of the assignment the publication imports
    /// from. `0` means "all course groups".
    pub async fn team_grouping_id(pool: &PgPool, publication: &Publication) -> Result<DbId, sqlx::Error> {
        let Some(assignment_id) = publication.import_from else {
            return Ok(0);
        };
        let grouping: Option<(DbId,)> = sqlx::query_as(
            "SELECT team_submission_grouping_id FROM assignments WHERE id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(pool)
        .await?;
        Ok(grouping.map(|(id,)| id).unwrap_or(0))
    }
}
