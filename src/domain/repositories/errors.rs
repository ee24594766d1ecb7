use thiserror::Error;

/// Errors surfaced by repositories and query execution
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Expected at most one result but the query returned more")]
    NonUniqueResult,

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
