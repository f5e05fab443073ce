//! Repository for the `publication_files` table.

use publication_core::types::DbId;
use sqlx::PgPool;

use crate::models::publication_file::{CreatePublicationFile, PublicationFile};

/// Column list for publication_files queries.
const COLUMNS: &str = "id, publication_id, user_id, file_id, filename, student_approval, \
    teacher_approval, created_at";

/// Provides access to submitted file records.
pub struct PublicationFileRepo;

impl PublicationFileRepo {
    /// Insert a submitted file, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePublicationFile,
    ) -> Result<PublicationFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO publication_files
                (publication_id, user_id, file_id, filename, student_approval, teacher_approval)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PublicationFile>(&query)
            .bind(input.publication_id)
            .bind(input.user_id)
            .bind(input.file_id)
            .bind(&input.filename)
            .bind(input.student_approval)
            .bind(input.teacher_approval)
            .fetch_one(pool)
            .await
    }

    /// Submission record id of a stored file within a publication.
    pub async fn find_record_id(
        pool: &PgPool,
        publication_id: DbId,
        file_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM publication_files WHERE publication_id = $1 AND file_id = $2",
        )
        .bind(publication_id)
        .bind(file_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Find a submitted file by publication and storage file id.
    pub async fn find_in_publication(
        pool: &PgPool,
        publication_id: DbId,
        file_id: DbId,
    ) -> Result<Option<PublicationFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publication_files WHERE publication_id = $1 AND file_id = $2"
        );
        sqlx::query_as::<_, PublicationFile>(&query)
            .bind(publication_id)
            .bind(file_id)
            .fetch_optional(pool)
            .await
    }

    /// Stored student approval code of a submission record, `None` when unset or unknown.
    pub async fn student_approval(pool: &PgPool, record_id: DbId) -> Result<Option<i16>, sqlx::Error> {
        let row: Option<(Option<i16>,)> =
            sqlx::query_as("SELECT student_approval FROM publication_files WHERE id = $1")
                .bind(record_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.and_then(|(code,)| code))
    }

    /// Files a group submitted to a publication, oldest first.
    pub async fn list_for_group(
        pool: &PgPool,
        publication_id: DbId,
        group_id: DbId,
    ) -> Result<Vec<PublicationFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publication_files
             WHERE publication_id = $1 AND user_id = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PublicationFile>(&query)
            .bind(publication_id)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }
}
