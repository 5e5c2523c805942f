//! Public file serving: `GET /*path` streams a stored file (no auth).

use crate::constants::STATIC_CACHE_CONTROL;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::storage_key::key_from_uri;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::Response,
};
use futures::StreamExt;
use picstash_core::AppError;
use picstash_storage::StorageError;
use std::sync::Arc;

fn lookup_error(err: StorageError) -> HttpAppError {
    match err {
        StorageError::NotFound(_) => {
            HttpAppError::from(AppError::NotFound("No file found".to_string()))
        }
        other => HttpAppError::from(other),
    }
}

/// Stream the file named by the request path. `/`, directories and missing
/// files are 404; paths escaping the upload root are 400.
#[tracing::instrument(skip(state), fields(operation = "serve_file"))]
pub async fn serve_file(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, HttpAppError> {
    let path = key_from_uri(&uri)?;
    if path.is_empty() {
        return Err(AppError::NotFound("No file found".to_string()).into());
    }

    let content_length = state
        .storage
        .content_length(&path)
        .await
        .map_err(lookup_error)?;

    let stream = state
        .storage
        .download_stream(&path)
        .await
        .map_err(lookup_error)?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CACHE_CONTROL, STATIC_CACHE_CONTROL)
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
