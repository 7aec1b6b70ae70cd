//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Conflicts with data that already exists.
#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("Username already in use: {0}")]
    DuplicateUsername(String),
}
