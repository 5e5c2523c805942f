use crate::constants::DELETE_CONFIRMATION;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::storage_key::key_from_uri;
use axum::{extract::State, http::Uri};
use picstash_core::AppError;
use picstash_storage::StorageError;
use std::sync::Arc;

/// Delete the single file named by the request path. The API key is checked
/// by middleware before this runs.
#[tracing::instrument(skip(state), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<&'static str, HttpAppError> {
    let path = key_from_uri(&uri)?;
    if path.is_empty() {
        return Err(AppError::BadRequest("No file name found".to_string()).into());
    }

    match state.storage.delete(&path).await {
        Ok(()) => {
            tracing::info!(storage_key = %path, "File deleted");
            Ok(DELETE_CONFIRMATION)
        }
        Err(StorageError::NotFound(_)) => Err(AppError::NotFound("No file found".to_string()).into()),
        Err(StorageError::InvalidKey(msg)) => Err(AppError::BadRequest(msg).into()),
        Err(e) => {
            tracing::error!(error = %e, storage_key = %path, "Cannot delete file");
            Err(AppError::Internal(format!("Cannot delete file: {}", e)).into())
        }
    }
}
