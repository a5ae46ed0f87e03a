//! User image handlers. The acting user comes from the `x-user-id` header.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use usersvc_core::image::{ImageResponse, PaginatedImageResponse, UploadResponse};

use crate::{
    handlers::extract::{image_id_param, multipart_body, UserIdHeader},
    models::{Data, ListImagesQuery},
    state::AppState,
};

use super::ApiError;

/// Upload an image (POST /api/v1/user-images).
pub async fn upload_image(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let upload = state.upload_parser.parse(multipart_body(multipart)?).await?;
    let saved: UploadResponse = state.images.save_user_image(user_id, upload).await?;

    Ok((StatusCode::CREATED, Json(Data::new(saved))))
}

/// List the acting user's images, newest first (GET /api/v1/user-images).
pub async fn list_images(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Query(query): Query<ListImagesQuery>,
) -> Result<Json<Data<PaginatedImageResponse>>, ApiError> {
    let input = query.into_input(user_id)?;
    Ok(Json(Data::new(state.images.get_all_user_images(input).await?)))
}

/// Get one image (GET /api/v1/user-images/{imageId}).
pub async fn get_image(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(image_id): Path<String>,
) -> Result<Json<Data<ImageResponse>>, ApiError> {
    let image_id = image_id_param(&image_id)?;
    Ok(Json(Data::new(
        state.images.get_by_user_id_image_id(user_id, image_id).await?,
    )))
}

/// Delete one image (DELETE /api/v1/user-images/{imageId}).
pub async fn delete_image(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
    Path(image_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let image_id = image_id_param(&image_id)?;
    state.images.delete_by_user_id_image_id(user_id, image_id).await?;

    Ok((StatusCode::ACCEPTED, Json(Data::new("ok"))))
}

/// Delete all of the acting user's images (DELETE /api/v1/user-images).
pub async fn delete_all_images(
    State(state): State<AppState>,
    UserIdHeader(user_id): UserIdHeader,
) -> Result<impl IntoResponse, ApiError> {
    state.images.delete_all_by_user_id(user_id).await?;

    Ok((StatusCode::ACCEPTED, Json(Data::new("ok"))))
}
