//! Extractors for values carried in headers and paths.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection,
        FromRequestParts, Multipart,
    },
    http::request::Parts,
    Json,
};
use uuid::Uuid;

use usersvc_core::image::parse_image_id;
use usersvc_core::service::ServiceError;
use usersvc_core::user::parse_user_id;

use super::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The acting user of an image request, from the `x-user-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdHeader(pub i64);

impl<S> FromRequestParts<S> for UserIdHeader
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::BadRequest(format!("Missing {USER_ID_HEADER} header"))
            })?;

        Ok(Self(parse_user_id(raw.trim())?))
    }
}

/// Parses a `{id}` path segment.
pub fn user_id_param(raw: &str) -> Result<i64, ApiError> {
    Ok(parse_user_id(raw)?)
}

/// Parses an `{imageId}` path segment.
pub fn image_id_param(raw: &str) -> Result<Uuid, ApiError> {
    Ok(parse_image_id(raw)?)
}

/// Unwraps a JSON body, reporting a malformed one as `BadRequest`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ServiceError::BadRequest(rejection.body_text()).into()),
    }
}

/// Unwraps a multipart body, reporting a malformed one as `BadRequest`.
pub fn multipart_body(
    payload: Result<Multipart, MultipartRejection>,
) -> Result<Multipart, ApiError> {
    payload.map_err(|rejection| ServiceError::BadRequest(rejection.body_text()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(value: Option<&str>) -> Result<UserIdHeader, ApiError> {
        let mut builder = Request::builder();
        if let Some(value) = value {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        UserIdHeader::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_user_id_header() {
        assert_eq!(extract(Some("12")).await.unwrap(), UserIdHeader(12));
        assert!(matches!(
            extract(None).await,
            Err(ApiError::Service(ServiceError::BadRequest(_)))
        ));
        assert!(matches!(
            extract(Some("12a")).await,
            Err(ApiError::Service(ServiceError::BadRequest(_)))
        ));
    }

    #[test]
    fn test_path_params() {
        assert_eq!(user_id_param("7").unwrap(), 7);
        assert!(user_id_param("seven").is_err());
        assert!(image_id_param("0190a4b2-7c1e-7d3a-9f00-00000000000a").is_ok());
        assert!(image_id_param("nope").is_err());
    }
}
