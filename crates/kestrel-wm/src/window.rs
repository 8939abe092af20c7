//! Draggable, modal-capable window.
//!
//! Layout is a two-row grid inside the window padding: the title bar (auto
//! height) on top, then `row_spacing`, then the content filling the rest.
//! Dragging starts on a press inside the header region and follows the
//! desktop's pointer-moved broadcast until a pointer release.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::{Point, Rect, Size};
use kestrel_ui::button::ButtonState;
use kestrel_ui::context::DrawContext;
use kestrel_ui::desktop::{Attachment, Broadcast, Desktop};
use kestrel_ui::event::Event;
use kestrel_ui::layout::Padding;
use kestrel_ui::style::{Stylesheet, WindowStyle};
use kestrel_ui::widget::{Frame, Placement, Widget, WidgetId};

use crate::title_bar::TitleBar;

/// A window. Cloning yields another handle to the same window.
#[derive(Debug, Clone)]
pub struct Window {
    shared: Rc<WindowShared>,
}

#[derive(Debug)]
struct WindowShared {
    id: WidgetId,
    state: RefCell<WindowState>,
    attachment: RefCell<Option<Attachment>>,
    closed: Event<()>,
}

struct WindowState {
    frame: Frame,
    background: Option<Color>,
    padding: Padding,
    row_spacing: i32,
    title_height: Option<i32>,
    title_bar: TitleBar,
    content: Option<Rc<dyn Widget>>,
    /// Content took the current press.
    content_pressed: bool,
    /// Pointer offset from the window origin while dragging.
    drag_anchor: Option<Point>,
    placed: bool,
    result: bool,
    can_focus: bool,
}

impl std::fmt::Debug for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowState")
            .field("frame", &self.frame)
            .field("title", &self.title_bar.label.text)
            .field("content", &self.content.as_ref().map(|c| c.id()))
            .field("drag_anchor", &self.drag_anchor)
            .field("placed", &self.placed)
            .finish_non_exhaustive()
    }
}

impl WindowState {
    fn measure(&self, available: Size) -> Size {
        let header = self.title_bar.measure(self.title_height);
        let inner_width = (available.width - self.padding.horizontal()).max(0);
        let inner_height = (available.height - self.padding.vertical()).max(0);
        let content = self
            .content
            .as_ref()
            .map(|c| {
                c.measure(Size::new(
                    inner_width,
                    (inner_height - header.height - self.row_spacing).max(0),
                ))
            })
            .unwrap_or(Size::ZERO);
        let natural = Size::new(
            header.width.max(content.width) + self.padding.horizontal(),
            header.height + self.row_spacing + content.height + self.padding.vertical(),
        );
        self.frame.resolve_size(natural)
    }

    /// Header row and content row from the current frame. Returns the
    /// content placement; the caller arranges it once the borrow is gone.
    fn arrange_rows(&mut self) -> Option<(Rc<dyn Widget>, Placement)> {
        let inner = self.padding.inner_rect(self.frame.actual_bounds());
        self.title_bar
            .arrange(Placement::in_parent(inner), inner.width, self.title_height);
        let offset = self.title_bar.frame.bounds().height + self.row_spacing;
        let row = Rect::new(
            inner.x,
            inner.y + offset,
            inner.width,
            (inner.height - offset).max(0),
        );
        self.content
            .as_ref()
            .map(|c| (Rc::clone(c), Placement::in_parent(row)))
    }

    fn center(&mut self) {
        let size = self.frame.bounds().size();
        let container = self.frame.container_bounds();
        self.frame.set_position(Point::new(
            (container.width - size.width) / 2,
            (container.height - size.height) / 2,
        ));
    }

    /// Header region in screen space: window origin to the title bar's far
    /// corner.
    fn header_region(&self) -> Rect {
        Rect::from_corners(
            self.frame.actual_bounds().origin(),
            self.title_bar.actual_bounds().bottom_right(),
        )
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    /// Create a window with the built-in default style.
    pub fn new() -> Self {
        Self::with_style(&WindowStyle::default())
    }

    pub fn with_style(style: &WindowStyle) -> Self {
        let window = Self {
            shared: Rc::new(WindowShared {
                id: WidgetId::next(),
                state: RefCell::new(WindowState {
                    frame: Frame::default(),
                    background: None,
                    padding: Padding::ZERO,
                    row_spacing: 8,
                    title_height: None,
                    title_bar: TitleBar::default(),
                    content: None,
                    content_pressed: false,
                    drag_anchor: None,
                    placed: false,
                    result: false,
                    can_focus: true,
                }),
                attachment: RefCell::new(None),
                closed: Event::new(),
            }),
        };
        window.apply_style(style);
        window
    }

    /// Create a window styled by the named entry of `sheet`.
    pub fn from_stylesheet(sheet: &Stylesheet, name: &str) -> Result<Self> {
        Ok(Self::with_style(sheet.window_style(name)?))
    }

    pub fn apply_style(&self, style: &WindowStyle) {
        let mut s = self.shared.state.borrow_mut();
        s.background = style.background;
        s.padding = style.padding;
        s.frame.width = style.width;
        s.frame.height = style.height;
        s.title_height = style.title_height;
        s.row_spacing = style.row_spacing;
        s.title_bar.apply_style(style);
    }

    /// Wrap this handle for a widget collection.
    pub fn as_widget(&self) -> Rc<dyn Widget> {
        Rc::new(self.clone())
    }

    pub fn title(&self) -> String {
        self.shared.state.borrow().title_bar.label.text.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.shared.state.borrow_mut().title_bar.label.text = title.into();
    }

    pub fn title_text_color(&self) -> Color {
        self.shared.state.borrow().title_bar.label.text_color
    }

    pub fn set_title_text_color(&self, color: Color) {
        self.shared.state.borrow_mut().title_bar.label.text_color = color;
    }

    /// Dialog result flag for callers of [`Window::show_modal`].
    pub fn result(&self) -> bool {
        self.shared.state.borrow().result
    }

    pub fn set_result(&self, result: bool) {
        self.shared.state.borrow_mut().result = result;
    }

    /// Explicit size; `None` sizes that axis to fit header and content.
    pub fn set_size(&self, width: Option<i32>, height: Option<i32>) {
        let mut s = self.shared.state.borrow_mut();
        s.frame.width = width;
        s.frame.height = height;
    }

    pub fn set_can_focus(&self, can_focus: bool) {
        self.shared.state.borrow_mut().can_focus = can_focus;
    }

    pub fn content(&self) -> Option<Rc<dyn Widget>> {
        self.shared.state.borrow().content.clone()
    }

    /// Replace the content widget.
    ///
    /// Setting the current content again does nothing. The old content is
    /// detached; the new one goes below the header and joins the window's
    /// desktop.
    pub fn set_content(&self, content: Option<Rc<dyn Widget>>) {
        let previous = {
            let mut s = self.shared.state.borrow_mut();
            let same = match (&s.content, &content) {
                (Some(a), Some(b)) => a.id() == b.id(),
                (None, None) => true,
                _ => false,
            };
            if same {
                return;
            }
            s.content_pressed = false;
            std::mem::replace(&mut s.content, content.clone())
        };
        if let Some(previous) = previous {
            previous.set_desktop(None);
        }
        if let Some(content) = content {
            content.set_desktop(self.desktop().as_ref());
        }
    }

    /// Fires once each time an open window is closed.
    pub fn closed(&self) -> &Event<()> {
        &self.shared.closed
    }

    pub fn position(&self) -> Point {
        self.shared.state.borrow().frame.position()
    }

    /// Move the window inside its container.
    pub fn set_position(&self, position: Point) {
        let content = {
            let mut s = self.shared.state.borrow_mut();
            s.frame.set_position(position);
            s.arrange_rows()
        };
        arrange_content(content);
    }

    /// Pointer offset captured when the current drag began.
    pub fn drag_anchor(&self) -> Option<Point> {
        self.shared.state.borrow().drag_anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor().is_some()
    }

    /// Whether the first layout pass since attaching has run.
    pub fn is_placed(&self) -> bool {
        self.shared.state.borrow().placed
    }

    /// Header region (window origin to the title bar's far corner) in screen
    /// space.
    pub fn header_bounds(&self) -> Rect {
        self.shared.state.borrow().header_region()
    }

    /// Close button bounds in screen space.
    pub fn close_button_bounds(&self) -> Rect {
        self.shared
            .state
            .borrow()
            .title_bar
            .close_button
            .frame
            .actual_bounds()
    }

    /// Center in the container. Does nothing while detached.
    pub fn center_on_desktop(&self) {
        if self.desktop().is_none() {
            return;
        }
        let content = {
            let mut s = self.shared.state.borrow_mut();
            s.center();
            s.arrange_rows()
        };
        arrange_content(content);
    }

    /// Open on `desktop` and take focus. Returns immediately.
    pub fn show_modal(&self, desktop: &Rc<Desktop>) {
        desktop.add_widget(self.as_widget());
        desktop.set_focused_widget(Some(self.shared.id));
        log::debug!("Window '{}' shown", self.title());
    }

    /// Remove the window from its desktop and fire `closed`. Does nothing if
    /// the window is not open.
    pub fn close(&self) {
        let Some(desktop) = self.desktop() else {
            return;
        };
        let id = self.shared.id;
        if !desktop.contains(id) {
            return;
        }
        if desktop.focused_widget() == Some(id) {
            desktop.set_focused_widget(None);
        }
        desktop.remove_widget(id);
        log::debug!("Window '{}' closed", self.title());
        self.shared.closed.emit(&());
    }

    fn on_desktop_pointer_moved(&self) {
        let Some(desktop) = self.desktop() else {
            return;
        };
        let pointer = desktop.pointer_position();
        let content = {
            let mut s = self.shared.state.borrow_mut();
            let Some(anchor) = s.drag_anchor else {
                return;
            };
            let size = s.frame.bounds().size();
            // Both regions in the window's container coordinates.
            let region = s
                .frame
                .parent_bounds()
                .unwrap_or_else(|| {
                    Rect::from_origin_size(Point::ZERO, desktop.bounds().size())
                });
            let mut p = pointer - anchor - s.frame.container_bounds().origin();

            if p.x < 0 {
                p.x = 0;
            }
            if p.x + size.width > region.right() {
                p.x = region.right() - size.width;
            }
            if p.y < 0 {
                p.y = 0;
            }
            if p.y + size.height > region.bottom() {
                p.y = region.bottom() - size.height;
            }

            s.frame.set_position(p);
            s.arrange_rows()
        };
        arrange_content(content);
    }

    fn end_drag(&self) {
        let mut s = self.shared.state.borrow_mut();
        if s.drag_anchor.take().is_some() {
            log::debug!("Window {:?} drag ended", self.shared.id);
        }
    }
}

fn arrange_content(content: Option<(Rc<dyn Widget>, Placement)>) {
    if let Some((widget, placement)) = content {
        widget.arrange(placement);
    }
}

impl Widget for Window {
    fn id(&self) -> WidgetId {
        self.shared.id
    }

    fn measure(&self, available: Size) -> Size {
        self.shared.state.borrow().measure(available)
    }

    fn arrange(&self, placement: Placement) {
        let attached = self.desktop().is_some();
        let content = {
            let mut s = self.shared.state.borrow_mut();
            let measured = s.measure(placement.container.size());
            s.frame.arrange(placement, measured);
            if !s.placed {
                if attached {
                    s.center();
                }
                s.placed = true;
            }
            s.arrange_rows()
        };
        arrange_content(content);
    }

    fn bounds(&self) -> Rect {
        self.shared.state.borrow().frame.bounds()
    }

    fn actual_bounds(&self) -> Rect {
        self.shared.state.borrow().frame.actual_bounds()
    }

    fn desktop(&self) -> Option<Rc<Desktop>> {
        self.shared
            .attachment
            .borrow()
            .as_ref()
            .and_then(Attachment::desktop)
    }

    fn set_desktop(&self, desktop: Option<&Rc<Desktop>>) {
        let previous = self.shared.attachment.borrow_mut().take();
        if let Some(previous) = previous {
            previous.release();
            log::debug!("Window {:?} detached", self.shared.id);
        }
        let content = {
            let mut s = self.shared.state.borrow_mut();
            s.placed = false;
            s.drag_anchor = None;
            s.content_pressed = false;
            if s.title_bar.close_button.is_pressed() {
                s.title_bar.close_button.state = ButtonState::Normal;
            }
            s.content.clone()
        };

        if let Some(desktop) = desktop {
            let mut attachment = Attachment::new(desktop);
            let weak: Weak<WindowShared> = Rc::downgrade(&self.shared);
            attachment.subscribe(Broadcast::PointerMoved, move |_| {
                if let Some(shared) = weak.upgrade() {
                    Window { shared }.on_desktop_pointer_moved();
                }
            });
            let weak: Weak<WindowShared> = Rc::downgrade(&self.shared);
            attachment.subscribe(Broadcast::PointerReleased, move |_| {
                if let Some(shared) = weak.upgrade() {
                    Window { shared }.end_drag();
                }
            });
            *self.shared.attachment.borrow_mut() = Some(attachment);
            log::debug!("Window {:?} attached", self.shared.id);
        }

        if let Some(content) = content {
            content.set_desktop(desktop);
        }
    }

    fn can_focus(&self) -> bool {
        self.shared.state.borrow().can_focus
    }

    fn on_touch_down(&self) {
        let Some(desktop) = self.desktop() else {
            return;
        };
        let pointer = desktop.pointer_position();
        let content = {
            let mut s = self.shared.state.borrow_mut();
            if s.header_region().contains(pointer) {
                let anchor = pointer - s.frame.actual_bounds().origin();
                s.drag_anchor = Some(anchor);
                log::debug!("Window {:?} drag started at {anchor:?}", self.shared.id);
                if s.title_bar
                    .close_button
                    .frame
                    .actual_bounds()
                    .contains(pointer)
                {
                    s.title_bar.close_button.press();
                }
                None
            } else {
                let hit = s
                    .content
                    .as_ref()
                    .filter(|c| c.actual_bounds().contains(pointer))
                    .map(Rc::clone);
                s.content_pressed = hit.is_some();
                hit
            }
        };
        if let Some(content) = content {
            content.on_touch_down();
        }
    }

    fn on_touch_up(&self) {
        let pointer = self
            .desktop()
            .map(|d| d.pointer_position())
            .unwrap_or_default();
        let (clicked, content) = {
            let mut s = self.shared.state.borrow_mut();
            s.drag_anchor = None;
            let clicked = s.title_bar.close_button.release(pointer);
            let content = if std::mem::take(&mut s.content_pressed) {
                s.content.clone()
            } else {
                None
            };
            (clicked, content)
        };
        if let Some(content) = content {
            content.on_touch_up();
        }
        if clicked {
            self.close();
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let content = {
            let s = self.shared.state.borrow();
            if let Some(bg) = s.background {
                ctx.backend.fill(s.frame.actual_bounds(), bg)?;
            }
            s.title_bar.draw(ctx)?;
            s.content.clone()
        };
        match content {
            Some(content) => content.draw(ctx),
            None => Ok(()),
        }
    }
}
