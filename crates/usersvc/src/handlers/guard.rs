//! Request guards applied to the whole API.

use axum::{extract::Request, middleware::Next, response::Response};

use super::ApiError;

pub const ID_TOKEN_HEADER: &str = "x-id-token";

/// Rejects requests without a non-empty `x-id-token` header. The token itself
/// is not verified.
pub async fn require_id_token(request: Request, next: Next) -> Result<Response, ApiError> {
    let present = request
        .headers()
        .get(ID_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty());

    if !present {
        return Err(ApiError::InvalidHeader(ID_TOKEN_HEADER));
    }
    Ok(next.run(request).await)
}
