use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use usersvc_core::service::{service_error_to_status_code, ServiceError};

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(ServiceError),
    /// A required header is missing or empty.
    #[error("Missing required header: {0}")]
    InvalidHeader(&'static str),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: &'static str,
    message: String,
    debug_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let debug_message = self.to_string();
        let (status, body) = match self {
            Self::Service(err) => {
                let status = StatusCode::from_u16(service_error_to_status_code(&err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(code = err.code(), error = %err, "request failed");
                } else {
                    tracing::debug!(code = err.code(), error = %err, "request rejected");
                }
                let body = ErrorBody {
                    code: err.code(),
                    message: err.message(),
                    debug_message,
                };
                (status, body)
            }
            Self::InvalidHeader(header) => {
                tracing::warn!(header, "missing required header");
                let body = ErrorBody {
                    code: "InvalidHeader",
                    message: "usersvc.invalidheader".to_string(),
                    debug_message,
                };
                (StatusCode::FORBIDDEN, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<ServiceError>,
{
    fn from(err: E) -> Self {
        Self::Service(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_service_error_body() {
        let (status, json) =
            render(ServiceError::NotFound("User not found: 9".to_string()).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            serde_json::json!({
                "code": "NotFound",
                "message": "usersvc.notfound",
                "debugMessage": "User not found: 9"
            })
        );
    }

    #[tokio::test]
    async fn test_each_kind_has_its_own_status() {
        let cases = [
            (ServiceError::BadRequest(String::new()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound(String::new()), StatusCode::NOT_FOUND),
            (ServiceError::Storage(String::new()), StatusCode::SERVICE_UNAVAILABLE),
            (ServiceError::Generic(String::new()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let (status, _) = render(err.into()).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn test_invalid_header_is_forbidden() {
        let (status, json) = render(ApiError::InvalidHeader("x-id-token")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["code"], "InvalidHeader");
        assert_eq!(json["message"], "usersvc.invalidheader");
    }
}
