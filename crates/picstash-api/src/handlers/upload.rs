use crate::constants::STORED_EXTENSION;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::base_url::file_url;
use crate::utils::upload::{extract_upload_form, resolve_base_name};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use picstash_core::{AppError, UploadResponse};
use std::sync::Arc;

/// Accept a multipart image upload, store it as a resized JPEG and return its
/// public URL. The API key is checked by middleware before this runs.
#[tracing::instrument(skip(state, headers, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid multipart request: {}", rejection.body_text()))
    })?;

    let form = extract_upload_form(multipart, state.config.max_upload_bytes()).await?;
    let base_name = resolve_base_name(form.name.as_deref())?;
    let size_before = form.data.len();

    let processed = state.image_processor.process(form.data).await?;

    let storage_key = format!("{}.{}", base_name, STORED_EXTENSION);
    state
        .storage
        .upload_with_key(&storage_key, processed.data.to_vec())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, storage_key = %storage_key, "Failed to save image");
            AppError::Internal(format!("Failed to save image: {}", e))
        })?;

    let size_after = state
        .storage
        .content_length(&storage_key)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, storage_key = %storage_key, "Failed to get file info");
            AppError::Internal(format!("Failed to get file info: {}", e))
        })?;

    tracing::info!(
        storage_key = %storage_key,
        source_format = ?processed.source_format,
        width = processed.width,
        height = processed.height,
        size_before,
        size_after,
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        url: file_url(&state.config, &headers, &storage_key),
        size_after,
    }))
}
