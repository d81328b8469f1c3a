//! Anchor calculation for the watermark.
//!
//! The text is anchored bottom-right: its box ends `margin` pixels before the
//! right and bottom edges.
//!
//! ```ignore
//! let image = ImageDimensions { width: 500, height: 300 };
//! let text = TextBox { width: 280, height: 34, top: 9 };
//! let pos = anchor_position(&image, &text, 20);
//! assert_eq!((pos.x, pos.y), (200, 246)); // 500 - 280 - 20, 300 - 34 - 20
//! ```

use super::text_renderer::TextBox;

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Where the watermark is placed. Coordinates may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i64,
    pub y: i64,
}

impl PlacementPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Bottom-right anchor for a text box.
///
/// Not clamped: an image smaller than the text plus margin yields negative
/// coordinates and the overlay is clipped when drawn.
pub fn anchor_position(
    image: &ImageDimensions,
    text: &TextBox,
    margin: u32,
) -> PlacementPosition {
    let m = margin as i64;
    PlacementPosition::new(
        image.width as i64 - text.width as i64 - m,
        image.height as i64 - text.height as i64 - m,
    )
}

/// Whether all of the text's ink lies inside the image.
///
/// Ink starts `text.top` pixels below the anchor's ascender line.
pub fn fits_within(pos: &PlacementPosition, image: &ImageDimensions, text: &TextBox) -> bool {
    let ink_top = pos.y + text.top as i64;
    pos.x >= 0
        && ink_top >= 0
        && pos.x + text.width as i64 <= image.width as i64
        && ink_top + text.height as i64 <= image.height as i64
}
