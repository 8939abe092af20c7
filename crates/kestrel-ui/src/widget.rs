//! Widget trait and the per-widget layout frame.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use kestrel_types::error::Result;
use kestrel_types::geometry::{Point, Rect, Size};

use crate::context::DrawContext;
use crate::desktop::Desktop;

/// Stable identity of a widget. Clones of a widget handle share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Where the layout engine places a widget for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Screen-space rectangle the widget is laid out in. For top-level
    /// widgets this is the desktop viewport.
    pub container: Rect,
    /// Client area of the layout parent, in the widget's own position
    /// coordinates. `None` for top-level widgets.
    pub parent: Option<Rect>,
}

impl Placement {
    /// Placement of a top-level widget on a viewport.
    pub fn top_level(viewport: Rect) -> Self {
        Self {
            container: viewport,
            parent: None,
        }
    }

    /// Placement inside a parent whose client area is `container`.
    pub fn in_parent(container: Rect) -> Self {
        Self {
            container,
            parent: Some(Rect::from_origin_size(Point::ZERO, container.size())),
        }
    }
}

/// Position, size and last layout result of one widget.
///
/// `left`/`top` are offsets inside the container; `bounds` is the assigned
/// rectangle in container coordinates and `actual_bounds` the same rectangle
/// in screen space.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub left: i32,
    pub top: i32,
    /// Explicit width; `None` uses the measured width.
    pub width: Option<i32>,
    /// Explicit height; `None` uses the measured height.
    pub height: Option<i32>,
    bounds: Rect,
    container: Rect,
    parent: Option<Rect>,
}

impl Frame {
    /// Record the result of a layout pass.
    pub fn arrange(&mut self, placement: Placement, measured: Size) {
        self.container = placement.container;
        self.parent = placement.parent;
        self.bounds = Rect::new(
            self.left,
            self.top,
            self.width.unwrap_or(measured.width),
            self.height.unwrap_or(measured.height),
        );
    }

    /// Explicit size where set, `measured` elsewhere.
    pub fn resolve_size(&self, measured: Size) -> Size {
        Size::new(
            self.width.unwrap_or(measured.width),
            self.height.unwrap_or(measured.height),
        )
    }

    /// Move the widget without waiting for the next layout pass.
    pub fn set_position(&mut self, position: Point) {
        self.left = position.x;
        self.top = position.y;
        self.bounds = self.bounds.with_origin(position);
    }

    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn actual_bounds(&self) -> Rect {
        self.bounds.translate(self.container.origin())
    }

    pub fn container_bounds(&self) -> Rect {
        self.container
    }

    pub fn parent_bounds(&self) -> Option<Rect> {
        self.parent
    }
}

/// A retained widget.
///
/// Methods take `&self`: widgets are shared handles and keep their state
/// behind interior mutability, so the desktop, a parent and the application
/// can all hold the same widget.
pub trait Widget {
    fn id(&self) -> WidgetId;

    /// Desired size given the space available.
    fn measure(&self, available: Size) -> Size;

    /// Layout pass: assign bounds and reconcile derived state.
    fn arrange(&self, placement: Placement);

    /// Assigned bounds in container coordinates.
    fn bounds(&self) -> Rect;

    /// Assigned bounds in screen space.
    fn actual_bounds(&self) -> Rect;

    /// The desktop this widget is attached to, if any.
    fn desktop(&self) -> Option<Rc<Desktop>>;

    /// Attach to `desktop` (or detach with `None`). Replacing one desktop
    /// with another releases the old subscriptions first.
    fn set_desktop(&self, desktop: Option<&Rc<Desktop>>);

    /// Whether a press on this widget should give it input focus.
    fn can_focus(&self) -> bool {
        false
    }

    /// Pointer pressed while this widget is the hit-test target.
    fn on_touch_down(&self) {}

    /// Pointer released after this widget received the press.
    fn on_touch_up(&self) {}

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()>;
}
