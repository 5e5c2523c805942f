//! The upload pipeline: decode, fit to width, re-encode as JPEG.

use crate::compression::ImageCompressor;
use crate::error::ProcessingError;
use crate::image::processor::ImageProcessor;
use crate::image::resize::ImageResize;
use bytes::Bytes;
use image::{GenericImageView, ImageFormat};

/// Settings applied to every uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub max_width: u32,
    pub jpeg_quality: u8,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            max_width: 1280,
            jpeg_quality: 80,
        }
    }
}

/// Result of running an upload through the pipeline
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// JPEG-encoded bytes
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    /// Format the upload was decoded from
    pub source_format: ImageFormat,
}

pub struct ImageTransformer;

impl ImageTransformer {
    /// Decode `data`, apply EXIF orientation, fit it to `options.max_width`
    /// and encode as JPEG at `options.jpeg_quality`.
    ///
    /// This is CPU-bound; async callers should run it on the blocking pool.
    pub fn process(
        data: &[u8],
        options: &ProcessingOptions,
    ) -> Result<ProcessedImage, ProcessingError> {
        let decoded = ImageProcessor::decode(data)?;
        let source_format = decoded.format;

        let resized = ImageResize::fit_width(decoded.image, options.max_width);
        let (width, height) = resized.dimensions();

        let data = ImageCompressor::compress_jpeg(&resized, options.jpeg_quality)?;

        tracing::debug!(
            source_format = ?source_format,
            width = width,
            height = height,
            output_size = data.len(),
            "Image processed"
        );

        Ok(ProcessedImage {
            data,
            width,
            height,
            source_format,
        })
    }
}
