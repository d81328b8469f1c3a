//! Fixed text watermark stamped onto every filtered image.
//!
//! The watermark is not configurable: `SERVERLESS FILTER BOT` at 40px in
//! full white, anchored 20px in from the bottom-right corner of the
//! grayscale canvas. Only the font resource can be chosen, and an unusable
//! font falls back to the embedded one.
//!
//! ```ignore
//! use serverless_filter_bot::watermark::{apply_watermark, load_font, WatermarkSpec};
//!
//! let font = load_font(None)?;
//! let placement = apply_watermark(&mut gray, &font, &WatermarkSpec::FIXED)?;
//! ```

pub mod error;
pub mod font;
pub mod position;
pub mod text_renderer;

pub use error::WatermarkError;
pub use font::{embedded_font, load_font, read_font, FontSource, LoadedFont};
pub use position::{anchor_position, fits_within, ImageDimensions, PlacementPosition};
pub use text_renderer::{draw_text, measure_text, TextBox};

use image::GrayImage;

pub const WATERMARK_TEXT: &str = "SERVERLESS FILTER BOT";
pub const FONT_SIZE: f32 = 40.0;
pub const FILL: u8 = 255;
pub const MARGIN: u32 = 20;

/// Watermark attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkSpec {
    pub text: &'static str,
    pub font_size: f32,
    pub fill: u8,
    pub margin: u32,
}

impl WatermarkSpec {
    /// The watermark every output carries.
    pub const FIXED: WatermarkSpec = WatermarkSpec {
        text: WATERMARK_TEXT,
        font_size: FONT_SIZE,
        fill: FILL,
        margin: MARGIN,
    };
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Where and how large the watermark ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkPlacement {
    pub position: PlacementPosition,
    pub text_box: TextBox,
    /// False when part of the text fell outside the canvas
    pub fully_visible: bool,
    pub pixels_painted: usize,
}

/// Measure, anchor and draw the watermark onto `canvas`.
pub fn apply_watermark(
    canvas: &mut GrayImage,
    font: &LoadedFont,
    spec: &WatermarkSpec,
) -> Result<WatermarkPlacement, WatermarkError> {
    let text_box = measure_text(font.font(), spec.text, spec.font_size)?;
    let image_dims = ImageDimensions {
        width: canvas.width(),
        height: canvas.height(),
    };

    let position = anchor_position(&image_dims, &text_box, spec.margin);
    let fully_visible = fits_within(&position, &image_dims, &text_box);
    if !fully_visible {
        tracing::warn!(
            image_width = image_dims.width,
            image_height = image_dims.height,
            text_width = text_box.width,
            text_height = text_box.height,
            x = position.x,
            y = position.y,
            "Image smaller than watermark box, overlay will be clipped"
        );
    }

    let pixels_painted = draw_text(
        canvas,
        font.font(),
        spec.text,
        spec.font_size,
        position,
        spec.fill,
    )?;

    Ok(WatermarkPlacement {
        position,
        text_box,
        fully_visible,
        pixels_painted,
    })
}
