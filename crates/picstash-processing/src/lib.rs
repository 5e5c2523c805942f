//! Picstash processing library
//!
//! Turns uploaded image bytes into the stored representation: decode (with
//! EXIF auto-orientation), fit to the configured width with Lanczos
//! resampling, and re-encode as JPEG. Also holds upload validation rules.

pub mod compression;
pub mod error;
pub mod image;
pub mod validator;

pub use compression::ImageCompressor;
pub use error::ProcessingError;
pub use self::image::{
    ImageProcessor, ImageResize, ImageTransformer, ProcessedImage, ProcessingOptions,
};
pub use validator::{FileValidator, ValidationError};
