//! Normalization tuned for printed packaging text: grayscale, Otsu
//! binarization, one 3x3 dilation to thicken strokes, then a 3x3 median to
//! drop speckle.

use image::{DynamicImage, GrayImage, ImageError, Luma};
use imageproc::contrast::otsu_level;
use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::dilate;
use service_core::imaging::to_gray_601;

/// Decodes uploaded bytes in any format the `image` crate supports.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

pub fn normalize(image: &DynamicImage) -> GrayImage {
    let gray = to_gray_601(image);
    let binary = binarize(&gray);
    // L-infinity radius 1 is a 3x3 square structuring element.
    let thickened = dilate(&binary, Norm::LInf, 1);
    median_filter(&thickened, 1, 1)
}

/// Pixels strictly above the Otsu level become 255, the rest 0.
pub fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    let mut out = gray.clone();

    for pixel in out.pixels_mut() {
        *pixel = if pixel[0] > level { Luma([255]) } else { Luma([0]) };
    }

    out
}
