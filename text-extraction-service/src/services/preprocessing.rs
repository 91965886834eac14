//! Image normalization ahead of OCR: grayscale, median smoothing, then a
//! fixed contrast boost. Contrast runs last so filter noise is not amplified.

use image::{GrayImage, ImageError};
use imageproc::filter::median_filter;
use service_core::imaging::to_gray_601;

/// Contrast multiplier applied around the mean intensity.
pub const CONTRAST_FACTOR: f32 = 2.0;

/// 3x3 median window.
const MEDIAN_RADIUS: u32 = 1;

/// Decodes `bytes` and returns the bitmap handed to the OCR engine.
pub fn normalize(bytes: &[u8]) -> Result<GrayImage, ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(enhance(&to_gray_601(&decoded)))
}

pub fn enhance(gray: &GrayImage) -> GrayImage {
    let smoothed = median_filter(gray, MEDIAN_RADIUS, MEDIAN_RADIUS);
    adjust_contrast(&smoothed, CONTRAST_FACTOR)
}

/// Scales each pixel's distance from the mean intensity by `factor`.
///
/// A factor of 1.0 is the identity, 0.0 yields a flat image at the mean.
pub fn adjust_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_intensity(image);
    let mut out = image.clone();

    for pixel in out.pixels_mut() {
        let value = mean + factor * (f32::from(pixel[0]) - mean);
        pixel[0] = value.round().clamp(0.0, 255.0) as u8;
    }

    out
}

/// Mean intensity rounded to the nearest integer level.
fn mean_intensity(image: &GrayImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }

    let sum: u64 = image.pixels().map(|p| u64::from(p[0])).sum();
    (sum as f64 / count as f64 + 0.5).floor() as f32
}
