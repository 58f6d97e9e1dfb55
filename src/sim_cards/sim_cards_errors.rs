use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for SIM-card-related operations
#[derive(Debug, Error)]
pub enum SimCardError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<DieselError> for SimCardError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => SimCardError::NotFound("Record not found".to_string()),
            other if crate::errors::is_connection_loss(&other) => {
                SimCardError::StoreUnavailable(other.to_string())
            }
            other => SimCardError::DatabaseError(other.to_string()),
        }
    }
}

/// Result type for SIM card operations
pub type Result<T> = std::result::Result<T, SimCardError>;
