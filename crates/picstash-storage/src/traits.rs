//! Storage abstraction trait
//!
//! This module defines the Storage trait that the upload, static and delete
//! handlers work against.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file contents as produced by [`Storage::download_stream`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// Every method takes a storage key (see the crate root documentation) and
/// must reject keys that would resolve outside the storage root with
/// [`StorageError::InvalidKey`] before touching the backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key`, replacing any existing file.
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file as a stream of chunks
    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream>;

    /// Delete a single file. Returns [`StorageError::NotFound`] when no
    /// regular file exists under the key, including when a parent component
    /// is itself a file.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Size in bytes of the file under the key
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Check that the storage root is present and usable
    async fn health_check(&self) -> StorageResult<()>;
}
