use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result type returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,
    /// The request payload failed validation.
    #[error("{0}")]
    Form(String),
    /// The write was rejected by a database constraint, e.g. an unknown
    /// category or tag id.
    #[error("{0}")]
    Constraint(String),
    /// Any other repository failure.
    #[error("internal error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Constraint(message),
            other => ServiceError::Repository(other),
        }
    }
}
