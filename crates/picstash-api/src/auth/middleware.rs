use crate::constants::API_KEY_HEADER;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use picstash_core::AppError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Reject the request with 401 unless the `X-API-Key` header matches the
/// configured key. Runs before the handler, so a rejected upload body is
/// never read. A missing header counts as an empty key.
pub async fn api_key_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let provided = match request.headers().get(API_KEY_HEADER) {
        Some(value) => value.to_str().ok(),
        None => Some(""),
    };

    let authorized = provided
        .map(|key| secure_compare(key, &state.config.api_key))
        .unwrap_or(false);

    if !authorized {
        let action = if request.method() == Method::DELETE {
            "delete"
        } else {
            "upload"
        };
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present = request.headers().contains_key(API_KEY_HEADER),
            "API key rejected"
        );
        return Err(HttpAppError::from(AppError::Unauthorized(format!(
            "Unauthorized to {} file",
            action
        ))));
    }

    Ok(next.run(request).await)
}
