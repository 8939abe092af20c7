//! Draw backend trait.
//!
//! Widgets render through this trait only. Real hosts implement it over their
//! GPU or software renderer; tests use a recording mock.

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;

/// Width of one glyph in the fallback fixed-width text metrics.
pub const BITMAP_GLYPH_WIDTH: u32 = 8;

/// Minimal immediate drawing surface.
pub trait DrawBackend {
    /// Fill a solid rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()>;

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: u16, color: Color)
    -> Result<()>;

    /// Fill `rect`, ignoring empty or inverted rectangles.
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        if rect.width <= 0 || rect.height <= 0 {
            return Ok(());
        }
        self.fill_rect(rect.x, rect.y, rect.width as u32, rect.height as u32, color)
    }
}
