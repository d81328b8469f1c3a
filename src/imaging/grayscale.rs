//! Single-channel luminance conversion

use image::{DynamicImage, GrayImage, Luma};

/// ITU-R 601-2 luma, in 16.16 fixed point (weights sum to 65536).
const R_WEIGHT: u32 = 19595;
const G_WEIGHT: u32 = 38470;
const B_WEIGHT: u32 = 7471;

/// Luminance of one RGB pixel.
///
/// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded to nearest.
/// A gray input (`r == g == b`) maps to itself.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
    ((weighted + 0x8000) >> 16) as u8
}

/// Convert any decoded image to an 8-bit single-channel buffer.
///
/// Alpha is dropped, not composited. Images with more than 8 bits per
/// channel are reduced to 8 bits first.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luminance(r, g, b)])
    })
}
