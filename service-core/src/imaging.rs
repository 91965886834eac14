//! Pixel conversions shared by the OCR preprocessing pipelines.

use image::{DynamicImage, GrayImage, Luma};

/// Converts to 8-bit grayscale with the ITU-R 601 luma weights
/// (299/587/114 per mille, rounded), the weighting PIL and OpenCV apply.
/// Alpha is ignored.
pub fn to_gray_601(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000;
        Luma([luma as u8])
    })
}
