//! Picstash Storage Library
//!
//! This crate provides the storage abstraction and its local filesystem
//! implementation.
//!
//! # Storage key format
//!
//! A key is a `/`-separated path relative to the upload root, e.g.
//! `cover.jpeg` or `banners/cover.jpeg`. Keys must not be empty and must not
//! contain `..` segments, a leading `/`, backslashes or NUL bytes. Key
//! validation is centralized in the `keys` module so every operation applies
//! the same rules.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
