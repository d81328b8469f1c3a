//! Image decode/encode error types

use std::fmt;

/// Errors that can occur while decoding or re-encoding the source object
#[derive(Debug, Clone)]
pub enum ImageError {
    /// Neither the content nor the key extension identifies a supported format
    UnsupportedFormat { format: String },
    /// The bytes could not be decoded as the detected format
    DecodeFailed { message: String },
    /// The processed buffer could not be encoded to the output format
    EncodeFailed { format: String, message: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnsupportedFormat { format } => {
                write!(f, "Unsupported image format: {}", format)
            }
            ImageError::DecodeFailed { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImageError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        ImageError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    /// True for errors raised while reading the source bytes
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ImageError::UnsupportedFormat { .. } | ImageError::DecodeFailed { .. }
        )
    }
}
