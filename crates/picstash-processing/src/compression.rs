use crate::error::ProcessingError;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// JPEG encoding for stored images
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode an image as baseline JPEG at the given quality (1-100).
    ///
    /// JPEG has no alpha channel, so the image is flattened to RGB first.
    pub fn compress_jpeg(img: &DynamicImage, quality: u8) -> Result<Bytes, ProcessingError> {
        let rgb = img.to_rgb8();
        let mut output = Vec::new();

        let encoder = JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        Ok(Bytes::from(output))
    }
}
