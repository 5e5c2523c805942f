//! Router assembly

use crate::auth::api_key_middleware;
use crate::constants::{HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, UPLOAD_PATH};
use crate::handlers::{delete, health, static_file, upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete as delete_route, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router.
///
/// `/health` and `/upload` are matched before the catch-all file routes, so
/// the methods they do not claim fall through to the file handlers there too.
/// Uploads and deletes sit behind the API key middleware; reads are public.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), api_key_middleware);
    let body_limit = state
        .config
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let file_routes = get(static_file::serve_file)
        .merge(delete_route(delete::delete_file).route_layer(auth.clone()));

    let upload_route = post(upload::upload_image)
        .route_layer(auth.clone())
        .layer(DefaultBodyLimit::max(body_limit))
        .merge(file_routes.clone());

    let health_route = get(health::health_check)
        .merge(delete_route(delete::delete_file).route_layer(auth));

    Router::new()
        .route(HEALTH_PATH, health_route)
        .route(UPLOAD_PATH, upload_route)
        .route("/", file_routes.clone())
        .route("/{*path}", file_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
