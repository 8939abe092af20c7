//! Single-line text label.

use kestrel_types::backend::BITMAP_GLYPH_WIDTH;
use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::Size;

use crate::context::DrawContext;
use crate::style::LabelStyle;
use crate::widget::{Frame, Placement};

/// A line of text. Measured with fixed-width glyph metrics; real shaping
/// belongs to the backend.
#[derive(Debug, Clone)]
pub struct Label {
    pub frame: Frame,
    pub text: String,
    pub text_color: Color,
    pub font_size: u16,
}

impl Default for Label {
    fn default() -> Self {
        Self::new("")
    }
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let style = LabelStyle::default();
        Self {
            frame: Frame::default(),
            text: text.into(),
            text_color: style.text_color,
            font_size: style.font_size,
        }
    }

    pub fn apply_style(&mut self, style: &LabelStyle) {
        self.text_color = style.text_color;
        self.font_size = style.font_size;
    }

    pub fn measure(&self) -> Size {
        let font = i32::from(self.font_size.max(8));
        let glyph = BITMAP_GLYPH_WIDTH as i32 * (font / 8);
        let width = self.text.chars().count() as i32 * glyph;
        self.frame.resolve_size(Size::new(width, font))
    }

    pub fn arrange(&mut self, placement: Placement) {
        let size = self.measure();
        self.frame.arrange(placement, size);
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        if self.text.is_empty() {
            return Ok(());
        }
        let r = self.frame.actual_bounds();
        ctx.backend
            .draw_text(&self.text, r.x, r.y, self.font_size, self.text_color)
    }
}
