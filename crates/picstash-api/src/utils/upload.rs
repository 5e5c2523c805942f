//! Multipart parsing and naming for the upload handler

use crate::constants::{FILE_FIELD, NAME_FIELD};
use crate::error::HttpAppError;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use picstash_core::AppError;
use picstash_processing::{FileValidator, ValidationError};
use uuid::Uuid;

/// The parts of an upload form the handler cares about
#[derive(Debug)]
pub struct UploadForm {
    pub data: Vec<u8>,
    pub name: Option<String>,
}

fn read_error(err: MultipartError, max_size: usize) -> HttpAppError {
    // The body limit sits just above the file limit, so hitting it means the
    // file is too large.
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return HttpAppError::from(ValidationError::FileTooLarge {
            size: max_size + 1,
            max: max_size,
        });
    }
    HttpAppError::from(AppError::BadRequest(format!(
        "Failed to read multipart: {}",
        err.body_text()
    )))
}

/// Extract the `file` bytes and optional `name` text from a multipart form.
/// Exactly one `file` field is accepted. The file is read chunk by chunk and
/// rejected as soon as it grows past `max_size`. Other fields are ignored.
pub async fn extract_upload_form(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadForm, HttpAppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut name: Option<String> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, max_size))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FILE_FIELD => {
                if file_data.is_some() {
                    return Err(HttpAppError::from(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )));
                }

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| read_error(e, max_size))?
                {
                    FileValidator::validate_size(data.len() + chunk.len(), max_size)?;
                    data.extend_from_slice(&chunk);
                }
                file_data = Some(data);
            }
            NAME_FIELD => {
                let text = field.text().await.map_err(|e| read_error(e, max_size))?;
                name = Some(text);
            }
            _ => {}
        }
    }

    let data = file_data
        .ok_or_else(|| HttpAppError::from(AppError::BadRequest("No image found".to_string())))?;

    Ok(UploadForm { data, name })
}

/// Resolve the base name a file is stored under: a fresh UUIDv4 when no
/// name (or a blank one) was supplied, otherwise the validated name.
pub fn resolve_base_name(name: Option<&str>) -> Result<String, ValidationError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(Uuid::new_v4().to_string()),
        Some(name) => {
            FileValidator::validate_base_name(name)?;
            Ok(name.to_string())
        }
    }
}
