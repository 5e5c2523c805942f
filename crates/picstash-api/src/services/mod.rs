pub mod image_processor;

pub use image_processor::UploadImageProcessor;
