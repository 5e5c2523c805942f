//! Runs the image pipeline off the async runtime

use picstash_processing::{ImageTransformer, ProcessedImage, ProcessingError, ProcessingOptions};

/// Image processor for uploads: decode, fit to width and JPEG-encode on the
/// blocking thread pool
#[derive(Debug, Clone, Copy)]
pub struct UploadImageProcessor {
    options: ProcessingOptions,
}

impl UploadImageProcessor {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }

    pub async fn process(&self, data: Vec<u8>) -> Result<ProcessedImage, ProcessingError> {
        let options = self.options;
        tokio::task::spawn_blocking(move || ImageTransformer::process(&data, &options))
            .await
            .map_err(|e| ProcessingError::Task(format!("Failed to process image: {}", e)))?
    }
}
