//! Pure mapping from service error kinds to HTTP status codes.

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `BadRequest` -> 400
/// - `NotFound` -> 404
/// - `Storage` -> 503 (a backing store failed or is unreachable)
/// - `Generic` -> 500
///
/// # Examples
///
/// ```
/// use usersvc_core::service::{service_error_to_status_code, ServiceError};
///
/// let error = ServiceError::NotFound("User not found: 7".to_string());
/// assert_eq!(service_error_to_status_code(&error), 404);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::BadRequest(_) => 400,
        ServiceError::NotFound(_) => 404,
        ServiceError::Storage(_) => 503,
        ServiceError::Generic(_) => 500,
    }
}
