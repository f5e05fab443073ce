use publication_core::types::{DbId, StoredFile, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `publication_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicationFile {
    pub id: DbId,
    pub publication_id: DbId,
    pub user_id: DbId,
    pub file_id: DbId,
    pub filename: String,
    pub student_approval: Option<i16>,
    pub teacher_approval: Option<i16>,
    pub created_at: Timestamp,
}

impl PublicationFile {
    pub fn stored_file(&self) -> StoredFile {
        StoredFile {
            id: self.file_id,
            filename: self.filename.clone(),
        }
    }
}

/// DTO for recording a submitted file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePublicationFile {
    pub publication_id: DbId,
    pub user_id: DbId,
    pub file_id: DbId,
    pub filename: String,
    pub student_approval: Option<i16>,
    pub teacher_approval: Option<i16>,
}
