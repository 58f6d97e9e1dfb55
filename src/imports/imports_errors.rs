use thiserror::Error;

/// Custom error type for import operations. All variants are pre-flight or
/// run-fatal; failures scoped to a single row are recorded in the
/// `ImportResult` instead and never surface through this type.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Table '{0}' is not an allowed import target")]
    InvalidTarget(String),
    #[error("Failed to read schema for table '{0}': {1}")]
    SchemaAccess(String, String),
    #[error("No merge key selected")]
    MissingMergeKey,
    #[error("Merge key field '{0}' is not among the mapped columns")]
    UnmappedMergeKey(String),
    #[error("Column mapping is empty")]
    EmptyMapping,
    #[error("Mapped field '{0}' is not a column of table '{1}'")]
    UnknownColumn(String, String),
    #[error("Could not parse CSV input: {0}")]
    InvalidCsv(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
