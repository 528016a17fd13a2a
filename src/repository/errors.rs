use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures raised by the data-access layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,
    /// A write violated a foreign-key, not-null, check or unique constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// Any other failure reported by the database driver.
    #[error("database error: {0}")]
    Database(DieselError),
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::UniqueViolation => {
                    RepositoryError::ConstraintViolation(info.message().to_string())
                }
                _ => RepositoryError::Database(DieselError::DatabaseError(kind, info)),
            },
            other => RepositoryError::Database(other),
        }
    }
}
