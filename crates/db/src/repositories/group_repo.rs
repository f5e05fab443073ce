//! Repository for course groups as seen by a publication.

use publication_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::{GroupFilesRow, GroupMemberRow};
use crate::models::publication::Publication;

/// Provides the group queries behind the group files table.
pub struct GroupRepo;

impl GroupRepo {
    /// One aggregated row per group of the publication's course.
    ///
    /// With a non-zero `grouping_id` only groups of that grouping are listed.
    /// Groups without files still appear, with a zero file count. Ordered by
    /// group name.
    pub async fn list_group_rows(
        pool: &PgPool,
        publication: &Publication,
        grouping_id: DbId,
    ) -> Result<Vec<GroupFilesRow>, sqlx::Error> {
        sqlx::query_as::<_, GroupFilesRow>(
            "SELECT
                g.id,
                g.name AS group_name,
                COUNT(files.id) AS file_count,
                SUM(files.student_approval)::BIGINT AS student_approval,
                MAX(files.created_at) AS time_modified
             FROM course_groups g
             LEFT JOIN publication_files files
                ON g.id = files.user_id AND files.publication_id = $1
             WHERE g.course_id = $2
               AND ($3 = 0 OR g.id IN (
                    SELECT gg.group_id FROM groupings_groups gg WHERE gg.grouping_id = $3
               ))
             GROUP BY g.id, g.name
             ORDER BY g.name ASC, g.id ASC",
        )
        .bind(publication.id)
        .bind(publication.course_id)
        .bind(grouping_id)
        .fetch_all(pool)
        .await
    }

    /// Members of a group ordered by last name, then first name.
    pub async fn list_members(pool: &PgPool, group_id: DbId) -> Result<Vec<GroupMemberRow>, sqlx::Error> {
        sqlx::query_as::<_, GroupMemberRow>(
            "SELECT u.id, u.first_name, u.last_name
             FROM group_members gm
             JOIN users u ON u.id = gm.user_id
             WHERE gm.group_id = $1
             ORDER BY u.last_name ASC, u.first_name ASC, u.id ASC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }
}
