use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobError {
    #[error("Blob not found: {0}")]
    NotFound(String),
    #[error("Blob store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Blob operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for blob operations.
pub type Result<T> = std::result::Result<T, BlobError>;
