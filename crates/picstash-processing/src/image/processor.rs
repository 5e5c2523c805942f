//! Image processor - decoding and orientation

use crate::error::ProcessingError;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;

/// A decoded image with EXIF orientation already applied.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode image bytes, sniffing the format from the content rather than
    /// trusting any client-supplied name or content type, and rotate/flip the
    /// pixels according to the EXIF orientation tag when one is present.
    pub fn decode(data: &[u8]) -> Result<DecodedImage, ProcessingError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::UnsupportedFormat(e.to_string()))?;

        let format = reader.format().ok_or_else(|| {
            ProcessingError::UnsupportedFormat("Unrecognized image data".to_string())
        })?;

        let mut decoder = reader
            .into_decoder()
            .map_err(|e| ProcessingError::UnsupportedFormat(e.to_string()))?;

        // Missing or malformed EXIF never fails the upload
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

        let mut image = DynamicImage::from_decoder(decoder)
            .map_err(|e| ProcessingError::UnsupportedFormat(e.to_string()))?;

        if orientation != Orientation::NoTransforms {
            tracing::debug!(orientation = ?orientation, "Applying EXIF orientation");
            image.apply_orientation(orientation);
        }

        Ok(DecodedImage { image, format })
    }
}
