use crate::types::DbId;

/// Boxed error from a host collaborator (store, identity lookup).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Collaborator failure: {0}")]
    Collaborator(#[source] BoxError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a collaborator failure, keeping the original error as the source.
    pub fn collaborator<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Collaborator(Box::new(err))
    }
}
