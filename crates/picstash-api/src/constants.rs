//! HTTP surface constants

/// Header carrying the shared secret for uploads and deletes
pub const API_KEY_HEADER: &str = "X-API-Key";

pub const UPLOAD_PATH: &str = "/upload";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field holding the image bytes
pub const FILE_FIELD: &str = "file";
/// Optional multipart field holding the base name
pub const NAME_FIELD: &str = "name";

/// Extension appended to every stored file
pub const STORED_EXTENSION: &str = "jpeg";

pub const DELETE_CONFIRMATION: &str = "File deleted successfully";

/// Headroom above the upload limit for multipart boundaries and the name
/// field, so an oversized file is reported by the size check instead of the
/// body limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Stored files can be replaced in place under the same name
pub const STATIC_CACHE_CONTROL: &str = "no-cache";
