//! Picstash Core Library
//!
//! This crate provides the configuration, error taxonomy and response models
//! shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::UploadResponse;
