// Error types module

use thiserror::Error;

use crate::imaging::ImageError;
use crate::s3::StorageError;
use crate::watermark::WatermarkError;

/// Top-level error for one invocation.
///
/// Every failure is reported to the runtime; nothing is swallowed or turned
/// into a success response.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Missing or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// The invocation payload is not a usable change notification
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

impl FilterError {
    /// Stable name for logs and the runtime's error type field.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::Config(_) => "ConfigError",
            FilterError::InvalidEvent(_) => "InvalidEvent",
            FilterError::Storage(_) => "StorageError",
            FilterError::Image(e) if e.is_decode_error() => "DecodeError",
            FilterError::Image(_) => "ImageError",
            FilterError::Watermark(_) => "WatermarkError",
        }
    }
}

impl From<FilterError> for lambda_runtime::Diagnostic {
    fn from(error: FilterError) -> Self {
        lambda_runtime::Diagnostic {
            error_type: error.kind().to_string(),
            error_message: error.to_string(),
        }
    }
}
