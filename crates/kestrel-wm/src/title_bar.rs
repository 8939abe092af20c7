//! Window title bar: a title label that fills the row and a close button
//! pinned to its right edge.

use kestrel_types::error::Result;
use kestrel_types::geometry::{Point, Rect, Size};
use kestrel_ui::button::ImageButton;
use kestrel_ui::context::DrawContext;
use kestrel_ui::label::Label;
use kestrel_ui::layout;
use kestrel_ui::style::WindowStyle;
use kestrel_ui::widget::{Frame, Placement};

/// Gap between the title and the close button.
pub const COLUMN_SPACING: i32 = 8;

#[derive(Debug, Clone, Default)]
pub struct TitleBar {
    pub frame: Frame,
    pub label: Label,
    pub close_button: ImageButton,
}

impl TitleBar {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            frame: Frame::default(),
            label: Label::new(title),
            close_button: ImageButton::default(),
        }
    }

    /// Apply the title and close-button parts of a window style. Absent parts
    /// leave the current look alone.
    pub fn apply_style(&mut self, style: &WindowStyle) {
        if let Some(title) = &style.title {
            self.label.apply_style(title);
        }
        if let Some(close) = &style.close_button {
            self.close_button.apply_style(close);
        }
    }

    /// Natural size; never shorter than `min_height`.
    pub fn measure(&self, min_height: Option<i32>) -> Size {
        let title = self.label.measure();
        let close = self.close_button.measure();
        let height = title
            .height
            .max(close.height)
            .max(min_height.unwrap_or(0));
        Size::new(title.width + COLUMN_SPACING + close.width, height)
    }

    /// Lay the bar out across `width` at the top of `placement.container`.
    pub fn arrange(&mut self, placement: Placement, width: i32, min_height: Option<i32>) {
        let height = self.measure(min_height).height;
        self.frame.arrange(placement, Size::new(width, height));

        let bar = self.frame.actual_bounds();
        let close = self.close_button.measure();
        let title = self.label.measure();

        self.close_button.frame.set_position(Point::new(
            (width - close.width).max(0),
            layout::center(height, close.height),
        ));
        self.close_button.arrange(Placement::in_parent(bar));

        self.label
            .frame
            .set_position(Point::new(0, layout::center(height, title.height)));
        self.label.arrange(Placement::in_parent(bar));
    }

    /// Bar bounds in screen space.
    pub fn actual_bounds(&self) -> Rect {
        self.frame.actual_bounds()
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        self.label.draw(ctx)?;
        self.close_button.draw(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_tallest_part() {
        let bar = TitleBar::new("Hi");
        assert_eq!(bar.measure(None), Size::new(16 + COLUMN_SPACING + 16, 16));
        assert_eq!(bar.measure(Some(40)).height, 40);
        assert_eq!(bar.measure(Some(4)).height, 16);
    }

    #[test]
    fn close_button_pinned_right() {
        let mut bar = TitleBar::new("Title");
        bar.arrange(Placement::in_parent(Rect::new(100, 50, 300, 200)), 300, Some(40));
        assert_eq!(bar.actual_bounds(), Rect::new(100, 50, 300, 40));
        assert_eq!(
            bar.close_button.frame.actual_bounds(),
            Rect::new(100 + 284, 50 + 12, 16, 16)
        );
        assert_eq!(bar.label.frame.actual_bounds().origin(), Point::new(100, 66));
    }

    #[test]
    fn missing_style_parts_are_left_alone() {
        let mut bar = TitleBar::new("x");
        let before = bar.close_button.size;
        let style = WindowStyle {
            title: None,
            close_button: None,
            ..WindowStyle::default()
        };
        bar.apply_style(&style);
        assert_eq!(bar.close_button.size, before);
    }
}
