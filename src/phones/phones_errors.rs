use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for phone-related operations
#[derive(Debug, Error)]
pub enum PhoneError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<DieselError> for PhoneError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => PhoneError::NotFound("Record not found".to_string()),
            other if crate::errors::is_connection_loss(&other) => {
                PhoneError::StoreUnavailable(other.to_string())
            }
            other => PhoneError::DatabaseError(other.to_string()),
        }
    }
}

/// Result type for phone operations
pub type Result<T> = std::result::Result<T, PhoneError>;
