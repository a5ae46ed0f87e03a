//! User CRUD handlers.
//!
//! `GET /users/{id}` is served cache-aside: create and update refresh the
//! cached copy, delete evicts it. A cache failure is logged and the request
//! carries on against the service.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use usersvc_core::cache::{deserialize_user, serialize_user, user_key};
use usersvc_core::user::{User, UserRequest};

use crate::{
    handlers::extract::{json_body, user_id_param},
    models::Data,
    state::AppState,
};

use super::ApiError;

async fn cached_user(state: &AppState, id: i64) -> Option<User> {
    let key = user_key(id);
    match state.cache.get(&key).await {
        Ok(Some(bytes)) => match deserialize_user(&bytes) {
            Ok(user) => {
                tracing::trace!(%key, "cache hit");
                Some(user)
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "dropping unreadable cache entry");
                None
            }
        },
        Ok(None) => {
            tracing::trace!(%key, "cache miss");
            None
        }
        Err(err) => {
            tracing::warn!(%key, error = %err, "cache read failed");
            None
        }
    }
}

async fn cache_user(state: &AppState, user: &User) {
    let key = user_key(user.id);
    let result = match serialize_user(user) {
        Ok(bytes) => state.cache.set(&key, &bytes, Some(state.cache_ttl)).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        tracing::warn!(%key, error = %err, "cache write failed");
    }
}

async fn evict_user(state: &AppState, id: i64) {
    let key = user_key(id);
    if let Err(err) = state.cache.delete(&key).await {
        tracing::warn!(%key, error = %err, "cache eviction failed");
    }
}

/// Create a user (POST /api/v1/users).
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = json_body(payload)?;
    let user = state.users.add(request.into_new_user()?).await?;
    cache_user(&state, &user).await;

    Ok((StatusCode::CREATED, Json(Data::new(user))))
}

/// List all users (GET /api/v1/users).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Data<Vec<User>>>, ApiError> {
    Ok(Json(Data::new(state.users.get_all().await?)))
}

/// Get a single user (GET /api/v1/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Data<User>>, ApiError> {
    let id = user_id_param(&id)?;

    if let Some(user) = cached_user(&state, id).await {
        return Ok(Json(Data::new(user)));
    }

    let user = state.users.get(id).await?;
    cache_user(&state, &user).await;

    Ok(Json(Data::new(user)))
}

/// Replace a user's profile (PUT /api/v1/users/{id}). The email never
/// changes.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<Data<User>>, ApiError> {
    let id = user_id_param(&id)?;
    let request = json_body(payload)?;
    let user = state.users.update(id, request.into_update()?).await?;
    cache_user(&state, &user).await;

    Ok(Json(Data::new(user)))
}

/// Delete a user (DELETE /api/v1/users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = user_id_param(&id)?;
    state.users.delete(id).await?;
    evict_user(&state, id).await;

    Ok((StatusCode::ACCEPTED, Json(Data::new("ok"))))
}
