//! Text measurement and rasterisation onto a grayscale canvas.
//!
//! Glyphs are laid out left to right with kerning, with the font's ascender
//! line at the origin. Measurements and drawing share the same layout so the
//! box used for anchoring matches the ink that gets drawn.

use super::position::PlacementPosition;
use super::WatermarkError;
use ab_glyph::{point, Font, FontArc, Glyph, PxScale, ScaleFont};
use image::GrayImage;

/// Bounding box of laid-out text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    /// Sum of advances and kerning, rounded up.
    pub width: u32,
    /// Ink height: `bottom - top` of the glyph bounds.
    pub height: u32,
    /// Offset of the highest ink pixel below the ascender line.
    pub top: i32,
}

struct Layout {
    glyphs: Vec<Glyph>,
    advance: f32,
}

fn layout(font: &FontArc, text: &str, font_size: f32) -> Layout {
    let scale = PxScale::from(font_size);
    let scaled_font = font.as_scaled(scale);
    let baseline_y = scaled_font.ascent();

    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        glyphs.push(glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y)));

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Layout {
        glyphs,
        advance: cursor_x,
    }
}

/// Measure the box `text` occupies at `font_size`.
pub fn measure_text(font: &FontArc, text: &str, font_size: f32) -> Result<TextBox, WatermarkError> {
    if text.is_empty() {
        return Err(WatermarkError::RenderError(
            "Cannot measure empty text".to_string(),
        ));
    }

    let Layout { glyphs, advance } = layout(font, text, font_size);

    let mut ink: Option<(f32, f32)> = None;
    for glyph in glyphs {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            ink = Some(match ink {
                Some((top, bottom)) => (top.min(bounds.min.y), bottom.max(bounds.max.y)),
                None => (bounds.min.y, bounds.max.y),
            });
        }
    }

    // Whitespace-only text has an advance but no ink.
    let (top, bottom) = match ink {
        Some((top, bottom)) => (top.floor() as i32, bottom.ceil() as i32),
        None => (0, 0),
    };

    Ok(TextBox {
        width: advance.max(0.0).ceil() as u32,
        height: (bottom - top).max(0) as u32,
        top,
    })
}

/// Draw `text` onto `canvas` with its ascender line at `position`.
///
/// Coverage is blended toward `fill`. Pixels falling outside the canvas are
/// skipped. Returns the number of canvas pixels that received ink.
pub fn draw_text(
    canvas: &mut GrayImage,
    font: &FontArc,
    text: &str,
    font_size: f32,
    position: PlacementPosition,
    fill: u8,
) -> Result<usize, WatermarkError> {
    if text.is_empty() {
        return Err(WatermarkError::RenderError(
            "Cannot render empty text".to_string(),
        ));
    }

    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;
    let mut painted = 0usize;

    for glyph in layout(font, text, font_size).glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let origin_x = position.x + bounds.min.x as i64;
        let origin_y = position.y + bounds.min.y as i64;

        outlined.draw(|px, py, coverage| {
            let x = origin_x + px as i64;
            let y = origin_y + py as i64;

            if x < 0 || y < 0 || x >= canvas_width || y >= canvas_height || coverage <= 0.0 {
                return;
            }

            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            pixel[0] = blend(pixel[0], fill, coverage);
            painted += 1;
        });
    }

    Ok(painted)
}

/// Blend `existing` toward `fill` by `coverage`.
fn blend(existing: u8, fill: u8, coverage: f32) -> u8 {
    let c = coverage.clamp(0.0, 1.0);
    let value = existing as f32 * (1.0 - c) + fill as f32 * c;
    value.round().clamp(0.0, 255.0) as u8
}
