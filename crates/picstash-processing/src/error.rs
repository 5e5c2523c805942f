use thiserror::Error;

/// Image processing errors
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The bytes could not be recognized or decoded as an image
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Re-encoding the processed image failed
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// The blocking processing task panicked or was cancelled
    #[error("Image processing task failed: {0}")]
    Task(String),
}
