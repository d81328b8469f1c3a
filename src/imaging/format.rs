//! Source format detection and output format selection
//!
//! The source format is sniffed from the object's magic bytes first and from
//! the key's extension second. Every decodable format can also be encoded, so
//! the output always keeps the source format.

use image::ImageFormat;

use super::error::ImageError;

/// Content type used when nothing better is known
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Formats the function can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Gif => ImageFormat::Gif,
            Self::WebP => ImageFormat::WebP,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Tiff => Some(Self::Tiff),
            _ => None,
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// Formats the function can encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => DEFAULT_CONTENT_TYPE,
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// The output format that preserves `source`.
    pub fn preserving(source: SourceFormat) -> Self {
        match source {
            SourceFormat::Png => Self::Png,
            SourceFormat::Jpeg => Self::Jpeg,
            SourceFormat::Gif => Self::Gif,
            SourceFormat::WebP => Self::WebP,
            SourceFormat::Bmp => Self::Bmp,
            SourceFormat::Tiff => Self::Tiff,
        }
    }
}

/// Detect the image format from content, falling back to the key extension.
pub fn detect_format(data: &[u8], key: &str) -> Result<SourceFormat, ImageError> {
    if let Ok(guessed) = image::guess_format(data) {
        return SourceFormat::from_image_format(guessed)
            .ok_or_else(|| ImageError::unsupported_format(format!("{:?}", guessed).to_lowercase()));
    }

    let file_name = key.rsplit('/').next().unwrap_or(key);
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    };

    SourceFormat::from_extension(ext).ok_or_else(|| {
        if ext.is_empty() {
            ImageError::unsupported_format("unknown")
        } else {
            ImageError::unsupported_format(ext.to_lowercase())
        }
    })
}
