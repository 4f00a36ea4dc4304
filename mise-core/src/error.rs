use thiserror::Error;

/// Failure reported by a document store backend.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Stored document is malformed: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    /// Missing and foreign records look the same to the caller.
    #[error("Not found")]
    NotFoundOrUnauthorized,

    #[error("Authentication required")]
    Authentication,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }
}
