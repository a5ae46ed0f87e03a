use thiserror::Error;

/// Errors that can occur when validating user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("First name cannot be empty")]
    EmptyFirstName,
    #[error("Last name cannot be empty")]
    EmptyLastName,
    #[error("Name must be between 2 and 100 characters")]
    InvalidNameLength,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Address cannot be empty")]
    EmptyAddress,
    #[error("Age out of range: {0}")]
    InvalidAge(u32),
    #[error("Invalid user ID: {0}")]
    InvalidId(String),
}
