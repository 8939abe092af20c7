//! Shared test utilities for kestrel-ui widget tests.
//!
//! Provides a [`MockBackend`] that records all draw calls for assertion and a
//! [`Probe`] widget that counts the input routed to it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use kestrel_types::backend::DrawBackend;
use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::{Rect, Size};

use crate::context::DrawContext;
use crate::desktop::Desktop;
use crate::event::{Event, ValueChanged};
use crate::widget::{Placement, Widget, WidgetId};

/// A recorded draw call from the mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum DrawCall {
    FillRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    DrawText {
        text: String,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    },
}

/// A mock backend that records all draw calls for test assertions.
pub struct MockBackend {
    pub calls: Vec<DrawCall>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Count of `FillRect` calls.
    pub fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
            .count()
    }

    /// Count of `DrawText` calls.
    pub fn draw_text_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::DrawText { .. }))
            .count()
    }

    /// Fill colors in call order.
    pub fn fill_colors(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Text draw calls as `(text, x, y)` tuples in call order.
    pub fn text_positions(&self) -> Vec<(&str, i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::DrawText { text, x, y, .. } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Check if any `DrawText` call contains the given substring.
    #[allow(dead_code)]
    pub fn has_text(&self, needle: &str) -> bool {
        self.calls.iter().any(|c| {
            if let DrawCall::DrawText { text, .. } = c {
                text.contains(needle)
            } else {
                false
            }
        })
    }
}

impl DrawBackend for MockBackend {
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
        Ok(())
    }
}

/// Subscribe a recorder to `event` and return the shared log.
pub fn record_changes<T: Copy + 'static>(
    event: &Event<ValueChanged<T>>,
) -> Rc<RefCell<Vec<ValueChanged<T>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    event.subscribe(move |c| sink.borrow_mut().push(*c));
    log
}

/// A widget with fixed screen bounds that counts the input it receives.
#[derive(Clone)]
pub struct Probe {
    inner: Rc<ProbeInner>,
}

struct ProbeInner {
    id: WidgetId,
    bounds: Rect,
    focusable: bool,
    desktop: RefCell<Weak<Desktop>>,
    downs: Cell<u32>,
    ups: Cell<u32>,
    placement: Cell<Option<Placement>>,
}

impl Probe {
    pub fn new(bounds: Rect) -> Self {
        Self::build(bounds, false)
    }

    pub fn focusable(bounds: Rect) -> Self {
        Self::build(bounds, true)
    }

    fn build(bounds: Rect, focusable: bool) -> Self {
        Self {
            inner: Rc::new(ProbeInner {
                id: WidgetId::next(),
                bounds,
                focusable,
                desktop: RefCell::new(Weak::new()),
                downs: Cell::new(0),
                ups: Cell::new(0),
                placement: Cell::new(None),
            }),
        }
    }

    pub fn into_widget(self) -> Rc<dyn Widget> {
        Rc::new(self)
    }

    pub fn downs(&self) -> u32 {
        self.inner.downs.get()
    }

    pub fn ups(&self) -> u32 {
        self.inner.ups.get()
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.inner.placement.get()
    }
}

impl Widget for Probe {
    fn id(&self) -> WidgetId {
        self.inner.id
    }

    fn measure(&self, _available: Size) -> Size {
        self.inner.bounds.size()
    }

    fn arrange(&self, placement: Placement) {
        self.inner.placement.set(Some(placement));
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds
    }

    fn actual_bounds(&self) -> Rect {
        self.inner.bounds
    }

    fn desktop(&self) -> Option<Rc<Desktop>> {
        self.inner.desktop.borrow().upgrade()
    }

    fn set_desktop(&self, desktop: Option<&Rc<Desktop>>) {
        *self.inner.desktop.borrow_mut() = desktop.map(Rc::downgrade).unwrap_or_default();
    }

    fn can_focus(&self) -> bool {
        self.inner.focusable
    }

    fn on_touch_down(&self) {
        self.inner.downs.set(self.inner.downs.get() + 1);
    }

    fn on_touch_up(&self) {
        self.inner.ups.set(self.inner.ups.get() + 1);
    }

    fn draw(&self, _ctx: &mut DrawContext<'_>) -> Result<()> {
        Ok(())
    }
}
