use thiserror::Error;

/// Errors from parsing image-related request input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Page cursor requires both lastKey and lastKeyDate")]
    IncompleteCursor,
    #[error("Invalid page cursor image ID: {0}")]
    InvalidCursorImageId(String),
    #[error("Invalid page cursor date: {0}")]
    InvalidCursorDate(String),
    #[error("Invalid image ID: {0}")]
    InvalidImageId(String),
    #[error("File name has no valid extension: {0}")]
    MissingExtension(String),
    #[error("File extension not allowed: {0}")]
    ExtensionNotAllowed(String),
}
