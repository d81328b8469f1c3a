//! Font resolution for the watermark text.
//!
//! A font file can be supplied through configuration. When it is missing or
//! cannot be parsed, the embedded monospace font is used instead and the
//! invocation carries on; glyph metrics differ but the watermark is still
//! drawn.

use super::WatermarkError;
use ab_glyph::FontArc;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Embedded font data (DejaVu Sans Mono, monospace).
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

static EMBEDDED_FONT: OnceLock<FontArc> = OnceLock::new();

/// Where the font in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from the configured file
    File(PathBuf),
    /// No file configured; embedded font used
    Embedded,
    /// Configured file was unusable; embedded font used instead
    Fallback(PathBuf),
}

/// A parsed font ready for measuring and drawing.
#[derive(Clone)]
pub struct LoadedFont {
    font: FontArc,
    source: FontSource,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("source", &self.source)
            .finish()
    }
}

impl LoadedFont {
    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// True when a configured font could not be used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FontSource::Fallback(_))
    }

    /// The embedded font, without consulting any file.
    pub fn embedded() -> Result<Self, WatermarkError> {
        Ok(Self {
            font: embedded_font()?,
            source: FontSource::Embedded,
        })
    }
}

/// Get the embedded font, parsing it on first use.
pub fn embedded_font() -> Result<FontArc, WatermarkError> {
    if let Some(font) = EMBEDDED_FONT.get() {
        return Ok(font.clone());
    }

    let font = FontArc::try_from_slice(EMBEDDED_FONT_DATA)
        .map_err(|e| WatermarkError::FontError(format!("embedded font: {}", e)))?;

    Ok(EMBEDDED_FONT.get_or_init(|| font).clone())
}

/// Read and parse a font file.
pub fn read_font(path: &Path) -> Result<FontArc, WatermarkError> {
    let data = std::fs::read(path)
        .map_err(|e| WatermarkError::FontError(format!("{}: {}", path.display(), e)))?;

    FontArc::try_from_vec(data)
        .map_err(|e| WatermarkError::FontError(format!("{}: {}", path.display(), e)))
}

/// Resolve the watermark font.
///
/// Only fails if the embedded font itself cannot be parsed.
pub fn load_font(path: Option<&Path>) -> Result<LoadedFont, WatermarkError> {
    let Some(path) = path else {
        tracing::debug!("No font path configured, using embedded font");
        return LoadedFont::embedded();
    };

    match read_font(path) {
        Ok(font) => {
            tracing::info!(font_path = %path.display(), "Loaded watermark font");
            Ok(LoadedFont {
                font,
                source: FontSource::File(path.to_path_buf()),
            })
        }
        Err(e) => {
            tracing::warn!(
                font_path = %path.display(),
                error = %e,
                "Font unavailable, falling back to embedded font"
            );
            Ok(LoadedFont {
                font: embedded_font()?,
                source: FontSource::Fallback(path.to_path_buf()),
            })
        }
    }
}
