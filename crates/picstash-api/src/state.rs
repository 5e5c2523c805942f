use crate::services::UploadImageProcessor;
use picstash_core::Config;
use picstash_processing::ProcessingOptions;
use picstash_storage::Storage;
use std::sync::Arc;

/// Shared, immutable application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub image_processor: UploadImageProcessor,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Arc<Self> {
        let image_processor = UploadImageProcessor::new(ProcessingOptions {
            max_width: config.max_width,
            jpeg_quality: config.jpeg_quality,
        });

        Arc::new(Self {
            config,
            storage,
            image_processor,
        })
    }
}
