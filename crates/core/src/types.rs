use serde::Serialize;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A course participant as seen by the publication activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

/// A file held by the host's file storage, referenced by its storage id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub id: DbId,
    pub filename: String,
}
