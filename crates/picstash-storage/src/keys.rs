//! Storage key validation shared by every backend operation.

use crate::traits::{StorageError, StorageResult};

/// Validate a storage key and return its normalized form.
///
/// Empty and `.` segments are dropped, so `a//./b.jpeg` becomes `a/b.jpeg`.
/// A key that is empty after normalization, starts with `/`, or contains a
/// `..` segment, a backslash or a NUL byte is rejected.
pub(crate) fn normalize_key(storage_key: &str) -> StorageResult<String> {
    if storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key must be relative".to_string(),
        ));
    }

    if storage_key.contains('\\') || storage_key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    let mut segments = Vec::new();
    for segment in storage_key.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(StorageError::InvalidKey(
                    "Storage key contains path traversal".to_string(),
                ))
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    Ok(segments.join("/"))
}
