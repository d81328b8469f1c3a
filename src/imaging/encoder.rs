//! Encoding of the processed grayscale buffer

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage, GrayImage, ImageEncoder as _};
use std::io::Cursor;

use super::error::ImageError;
use super::format::OutputFormat;

/// JPEG quality used when re-encoding JPEG sources
pub const JPEG_QUALITY: u8 = 75;

/// Result of encoding an image
#[derive(Debug)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
    /// Content-Type to store with the object
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self {
            data,
            format,
            content_type: format.content_type(),
        }
    }
}

/// Encode a grayscale buffer to the requested format.
pub fn encode(image: &GrayImage, format: OutputFormat) -> Result<EncodedImage, ImageError> {
    let data = match format {
        OutputFormat::Png => encode_png(image)?,
        OutputFormat::Jpeg => encode_jpeg(image)?,
        OutputFormat::Gif => encode_gif(image)?,
        OutputFormat::WebP => encode_webp(image)?,
        OutputFormat::Bmp => encode_bmp(image)?,
        OutputFormat::Tiff => encode_tiff(image)?,
    };

    Ok(EncodedImage::new(data, format))
}

fn encode_png(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut output = Cursor::new(Vec::new());
    PngEncoder::new(&mut output)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(|e| ImageError::encode_failed("png", e.to_string()))?;
    Ok(output.into_inner())
}

fn encode_jpeg(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut output = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(|e| ImageError::encode_failed("jpeg", e.to_string()))?;
    Ok(output.into_inner())
}

fn encode_gif(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    // The GIF codec only takes RGB(A); r == g == b keeps it gray.
    let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();

    let mut output = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut output);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| ImageError::encode_failed("gif", e.to_string()))?;
    }
    Ok(output)
}

/// Lossless VP8L; the crate has no lossy WebP encoder without libwebp.
fn encode_webp(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut output = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut output)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(|e| ImageError::encode_failed("webp", e.to_string()))?;
    Ok(output.into_inner())
}

fn encode_bmp(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut output = Vec::new();
    BmpEncoder::new(&mut output)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(|e| ImageError::encode_failed("bmp", e.to_string()))?;
    Ok(output)
}

fn encode_tiff(image: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut output = Cursor::new(Vec::new());
    TiffEncoder::new(&mut output)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)
        .map_err(|e| ImageError::encode_failed("tiff", e.to_string()))?;
    Ok(output.into_inner())
}
