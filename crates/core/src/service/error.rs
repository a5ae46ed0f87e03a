use thiserror::Error;

use crate::blob::BlobError;
use crate::image::ImageError;
use crate::storage::RepositoryError;
use crate::user::UserError;

/// The error kinds services report to callers. Store errors are folded into
/// these so no backend type crosses the service boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Storage(String),
    #[error("{0}")]
    Generic(String),
}

impl ServiceError {
    /// The error code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::NotFound(_) => "NotFound",
            Self::Storage(_) => "StorageError",
            Self::Generic(_) => "GenericError",
        }
    }

    /// The stable message key sent to clients, e.g. `usersvc.notfound`.
    pub fn message(&self) -> String {
        format!("usersvc.{}", self.code().to_lowercase())
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<BlobError> for ServiceError {
    fn from(err: BlobError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<UserError> for ServiceError {
    fn from(err: UserError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ImageError> for ServiceError {
    fn from(err: ImageError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let storage = ServiceError::Storage("disk on fire".to_string());
        assert_eq!(storage.code(), "StorageError");
        assert_eq!(storage.message(), "usersvc.storageerror");
        assert_eq!(storage.to_string(), "disk on fire");

        assert_eq!(ServiceError::BadRequest(String::new()).message(), "usersvc.badrequest");
        assert_eq!(ServiceError::Generic(String::new()).code(), "GenericError");
    }

    #[test]
    fn test_repository_not_found_stays_not_found() {
        let err = ServiceError::from(RepositoryError::NotFound {
            entity_type: "User",
            id: "4".to_string(),
        });
        assert_eq!(err, ServiceError::NotFound("User not found: 4".to_string()));
    }

    #[test]
    fn test_other_store_errors_are_storage() {
        let duplicate = ServiceError::from(RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "a@b.co".to_string(),
        });
        assert_eq!(duplicate.code(), "StorageError");

        let blob = ServiceError::from(BlobError::OperationFailed("denied".to_string()));
        assert_eq!(blob, ServiceError::Storage("Blob operation failed: denied".to_string()));
    }

    #[test]
    fn test_input_errors_are_bad_request() {
        assert_eq!(ServiceError::from(UserError::EmptyAddress).code(), "BadRequest");
        assert_eq!(ServiceError::from(ImageError::IncompleteCursor).code(), "BadRequest");
    }
}
