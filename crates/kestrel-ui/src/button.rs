//! Image button: the pressable sub-element used for slider knobs and
//! window close buttons.

use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::{Point, Size};

use crate::context::DrawContext;
use crate::style::ImageButtonStyle;
use crate::widget::{Frame, Placement};

/// Button visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Default state.
    Normal,
    /// Button is being pressed.
    Pressed,
    /// Button is disabled and non-interactive.
    Disabled,
}

/// A pressable rectangle with per-state fills.
///
/// Owned by its parent widget; it has no desktop of its own and learns about
/// presses from the parent.
#[derive(Debug, Clone)]
pub struct ImageButton {
    pub frame: Frame,
    pub state: ButtonState,
    pub background: Option<Color>,
    pub pressed_background: Option<Color>,
    /// Natural size, used when the frame has no explicit size.
    pub size: Size,
}

impl Default for ImageButton {
    fn default() -> Self {
        Self::with_style(&ImageButtonStyle::default())
    }
}

impl ImageButton {
    pub fn with_style(style: &ImageButtonStyle) -> Self {
        let mut button = Self {
            frame: Frame::default(),
            state: ButtonState::Normal,
            background: None,
            pressed_background: None,
            size: Size::ZERO,
        };
        button.apply_style(style);
        button
    }

    pub fn apply_style(&mut self, style: &ImageButtonStyle) {
        self.background = style.background;
        self.pressed_background = style.pressed_background;
        self.size = Size::new(style.width, style.height);
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    /// Enter the pressed state. Disabled buttons ignore presses.
    pub fn press(&mut self) {
        if self.state != ButtonState::Disabled {
            self.state = ButtonState::Pressed;
        }
    }

    /// Leave the pressed state. Returns `true` when this completes a click,
    /// i.e. the button was pressed and the pointer is still over it.
    pub fn release(&mut self, pointer: Point) -> bool {
        if !self.is_pressed() {
            return false;
        }
        self.state = ButtonState::Normal;
        self.frame.actual_bounds().contains(pointer)
    }

    /// Size after explicit frame overrides.
    pub fn measure(&self) -> Size {
        self.frame.resolve_size(self.size)
    }

    pub fn arrange(&mut self, placement: Placement) {
        let size = self.size;
        self.frame.arrange(placement, size);
    }

    fn bg_color(&self) -> Option<Color> {
        match self.state {
            ButtonState::Pressed => self.pressed_background.or(self.background),
            _ => self.background,
        }
    }

    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        if let Some(bg) = self.bg_color() {
            ctx.backend.fill(self.frame.actual_bounds(), bg)?;
        }
        Ok(())
    }
}
