use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for worker-related operations
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<DieselError> for WorkerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => WorkerError::NotFound("Record not found".to_string()),
            other if crate::errors::is_connection_loss(&other) => {
                WorkerError::StoreUnavailable(other.to_string())
            }
            other => WorkerError::DatabaseError(other.to_string()),
        }
    }
}

/// Result type for worker operations
pub type Result<T> = std::result::Result<T, WorkerError>;
