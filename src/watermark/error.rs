//! Watermark error types.

use std::fmt;

/// Errors that can occur while preparing or drawing the watermark.
#[derive(Debug)]
pub enum WatermarkError {
    /// A font resource could not be read or parsed
    FontError(String),

    /// Failed to render the watermark text
    RenderError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontError(msg) => write!(f, "Failed to load font: {}", msg),
            Self::RenderError(msg) => write!(f, "Failed to render text watermark: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
