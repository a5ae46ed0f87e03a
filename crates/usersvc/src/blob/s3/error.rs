//! S3 error mapping.

use std::fmt::Debug;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

use usersvc_core::blob::BlobError;

/// Map an S3 SDK error to BlobError.
pub fn map_s3_error<E, R>(err: SdkError<E, R>, operation: &str) -> BlobError
where
    E: ProvideErrorMetadata + Debug,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            BlobError::ConnectionFailed(format!("{operation}: S3 is unreachable"))
        }
        SdkError::ServiceError(service) => {
            let err = service.into_err();
            BlobError::OperationFailed(describe(operation, err.code(), err.message()))
        }
        other => BlobError::OperationFailed(format!("{operation} failed: {other:?}")),
    }
}

/// Formats an S3 error code and message.
pub fn describe(operation: &str, code: Option<&str>, message: Option<&str>) -> String {
    format!(
        "{operation} failed: {} ({})",
        message.unwrap_or("no message"),
        code.unwrap_or("Unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe("PutObject", Some("NoSuchBucket"), Some("bucket missing")),
            "PutObject failed: bucket missing (NoSuchBucket)"
        );
        assert_eq!(
            describe("DeleteObject", None, None),
            "DeleteObject failed: no message (Unknown)"
        );
    }
}
