use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Calculate the dimensions of an image fitted to `max_width`.
    ///
    /// Images that are already narrow enough keep their size. Otherwise the
    /// width becomes `max_width` and the height follows the aspect ratio,
    /// rounded and never below one pixel.
    pub fn target_dimensions(orig_width: u32, orig_height: u32, max_width: u32) -> (u32, u32) {
        if orig_width <= max_width || orig_width == 0 {
            return (orig_width, orig_height);
        }

        let aspect_ratio = orig_height as f64 / orig_width as f64;
        let height = (max_width as f64 * aspect_ratio).round() as u32;
        (max_width, height.max(1))
    }

    /// Fit an image to `max_width` using Lanczos3 resampling
    pub fn fit_width(img: DynamicImage, max_width: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::target_dimensions(orig_width, orig_height, max_width);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        tracing::debug!(
            from_width = orig_width,
            from_height = orig_height,
            to_width = width,
            to_height = height,
            "Resizing image"
        );
        img.resize_exact(width, height, FilterType::Lanczos3)
    }
}
