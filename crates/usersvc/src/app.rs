use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        extract::USER_ID_HEADER,
        guard::{require_id_token, ID_TOKEN_HEADER},
        health::livez,
        images::{delete_all_images, delete_image, get_image, list_images, upload_image},
        users::{create_user, delete_user, get_user, list_users, update_user},
    },
    state::AppState,
};

/// Room for multipart framing and the metadata part on top of the image.
/// A body over the limit fails while the extractor reads it, so the client
/// still gets a JSON `BadRequest`.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ID_TOKEN_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    let body_limit = state.upload_parser.max_bytes() + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        // User routes
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Image routes
        .route(
            "/user-images",
            get(list_images)
                .post(upload_image)
                .delete(delete_all_images),
        )
        .route(
            "/user-images/{imageId}",
            get(get_image).delete(delete_image),
        )
        .layer(middleware::from_fn(require_id_token))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}
