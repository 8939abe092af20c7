//! Shared test utilities for kestrel-wm tests.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use kestrel_types::backend::DrawBackend;
use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::{Rect, Size};
use kestrel_ui::context::DrawContext;
use kestrel_ui::desktop::Desktop;
use kestrel_ui::widget::{Placement, Widget, WidgetId};

/// A recorded draw call from the mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum DrawCall {
    FillRect { rect: Rect, color: Color },
    DrawText { text: String, x: i32, y: i32 },
}

/// A mock backend that records all draw calls for test assertions.
pub struct MockBackend {
    pub calls: Vec<DrawCall>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// One tag per call: `fill` or `text:<text>`.
    pub fn labels(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|c| match c {
                DrawCall::FillRect { .. } => "fill".to_string(),
                DrawCall::DrawText { text, .. } => format!("text:{text}"),
            })
            .collect()
    }
}

impl DrawBackend for MockBackend {
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect {
            rect: Rect::new(x, y, w as i32, h as i32),
            color,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _font_size: u16,
        _color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }
}

/// Fixed-size content widget that records what the window does to it.
#[derive(Clone)]
pub struct Block {
    inner: Rc<BlockInner>,
}

struct BlockInner {
    id: WidgetId,
    size: Size,
    bounds: Cell<Rect>,
    placement: Cell<Option<Placement>>,
    desktop: RefCell<Weak<Desktop>>,
    attaches: Cell<u32>,
    downs: Cell<u32>,
    ups: Cell<u32>,
}

impl Block {
    pub fn new(size: Size) -> Self {
        Self {
            inner: Rc::new(BlockInner {
                id: WidgetId::next(),
                size,
                bounds: Cell::new(Rect::ZERO),
                placement: Cell::new(None),
                desktop: RefCell::new(Weak::new()),
                attaches: Cell::new(0),
                downs: Cell::new(0),
                ups: Cell::new(0),
            }),
        }
    }

    pub fn as_widget(&self) -> Rc<dyn Widget> {
        Rc::new(self.clone())
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.inner.placement.get()
    }

    pub fn attach_count(&self) -> u32 {
        self.inner.attaches.get()
    }

    pub fn downs(&self) -> u32 {
        self.inner.downs.get()
    }

    pub fn ups(&self) -> u32 {
        self.inner.ups.get()
    }
}

impl Widget for Block {
    fn id(&self) -> WidgetId {
        self.inner.id
    }

    fn measure(&self, _available: Size) -> Size {
        self.inner.size
    }

    fn arrange(&self, placement: Placement) {
        self.inner.placement.set(Some(placement));
        self.inner
            .bounds
            .set(Rect::from_origin_size(placement.container.origin(), self.inner.size));
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds.get()
    }

    fn actual_bounds(&self) -> Rect {
        self.inner.bounds.get()
    }

    fn desktop(&self) -> Option<Rc<Desktop>> {
        self.inner.desktop.borrow().upgrade()
    }

    fn set_desktop(&self, desktop: Option<&Rc<Desktop>>) {
        if desktop.is_some() {
            self.inner.attaches.set(self.inner.attaches.get() + 1);
        }
        *self.inner.desktop.borrow_mut() = desktop.map(Rc::downgrade).unwrap_or_default();
    }

    fn on_touch_down(&self) {
        self.inner.downs.set(self.inner.downs.get() + 1);
    }

    fn on_touch_up(&self) {
        self.inner.ups.set(self.inner.ups.get() + 1);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        ctx.backend.fill(self.inner.bounds.get(), Color::WHITE)
    }
}
