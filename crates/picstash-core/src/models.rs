use serde::{Deserialize, Serialize};

/// Body returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Publicly reachable URL of the stored file
    pub url: String,
    /// Size in bytes of the stored file after resize and re-encode
    pub size_after: u64,
}
