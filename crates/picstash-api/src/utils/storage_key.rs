//! Storage keys taken from request paths

use crate::error::HttpAppError;
use axum::http::Uri;
use percent_encoding::percent_decode_str;
use picstash_core::AppError;

/// Storage key named by a request path: the decoded path without its leading
/// slash. `/` yields an empty key.
pub fn key_from_uri(uri: &Uri) -> Result<String, HttpAppError> {
    let raw = uri.path().trim_start_matches('/');
    percent_decode_str(raw)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|_| AppError::BadRequest("File name is not valid UTF-8".to_string()).into())
}
