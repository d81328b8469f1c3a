//! Raster handling for the filter: format detection, decoding, luminance
//! conversion and re-encoding.
//!
//! PNG, JPEG, GIF, WebP, BMP and TIFF are read, and each is written back in
//! its own format.

pub mod encoder;
pub mod error;
pub mod format;
pub mod grayscale;

pub use encoder::{encode, EncodedImage, JPEG_QUALITY};
pub use error::ImageError;
pub use format::{detect_format, OutputFormat, SourceFormat, DEFAULT_CONTENT_TYPE};
pub use grayscale::{luminance, to_grayscale};

use image::DynamicImage;
use std::io::Cursor;

/// Decode raw object bytes as `format`.
pub fn decode(data: &[u8], format: SourceFormat) -> Result<DynamicImage, ImageError> {
    image::load(Cursor::new(data), format.image_format())
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}
