//! Test fixtures: images generated in memory.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture image");
    buffer
}

/// PNG of the given size with a smooth gradient.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    encode(&img, ImageFormat::Png)
}

/// GIF of the given size with a flat colour.
pub fn create_test_gif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    encode(&img, ImageFormat::Gif)
}

/// PNG filled with pseudo-random noise, so it does not compress.
/// An 800x800 noise PNG is close to 2 MiB.
pub fn create_noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut seed: u32 = 0x2545_F491;
    let img = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed & 0xFF) as u8
        };
        Rgb([next(), next(), next()])
    });
    encode(&img, ImageFormat::Png)
}
