//! Image processing module
//!
//! - Decoding and orientation (processor)
//! - Fit-to-width resizing (resize)
//! - The upload pipeline tying them to JPEG compression (transformer)

pub mod processor;
pub mod resize;
pub mod transformer;

pub use processor::{DecodedImage, ImageProcessor};
pub use resize::ImageResize;
pub use transformer::{ImageTransformer, ProcessedImage, ProcessingOptions};
