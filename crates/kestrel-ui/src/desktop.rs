//! The desktop: top-level surface, pointer-event source and focus holder.
//!
//! The desktop keeps the collection of top-level widgets, the focused widget
//! and the current pointer position. It broadcasts pointer-moved and
//! pointer-released notifications to whoever subscribed; widgets subscribe
//! through an [`Attachment`] only while they are attached.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use kestrel_types::error::Result;
use kestrel_types::geometry::{Point, Rect};
use kestrel_types::input::InputEvent;

use crate::context::DrawContext;
use crate::event::{Event, HandlerId};
use crate::widget::{Placement, Widget, WidgetId};

/// The two pointer broadcasts a desktop emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Broadcast {
    PointerMoved,
    PointerReleased,
}

/// Top-level surface.
pub struct Desktop {
    bounds: Cell<Rect>,
    pointer: Cell<Point>,
    widgets: RefCell<Vec<Rc<dyn Widget>>>,
    focused: Cell<Option<WidgetId>>,
    touch_target: RefCell<Option<Rc<dyn Widget>>>,
    pointer_moved: Event<()>,
    pointer_released: Event<()>,
}

impl Desktop {
    /// Create a desktop covering `bounds`.
    pub fn new(bounds: Rect) -> Rc<Self> {
        Rc::new(Self {
            bounds: Cell::new(bounds),
            pointer: Cell::new(Point::ZERO),
            widgets: RefCell::new(Vec::new()),
            focused: Cell::new(None),
            touch_target: RefCell::new(None),
            pointer_moved: Event::new(),
            pointer_released: Event::new(),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    /// Resize the viewport. Takes effect on the next layout pass.
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    /// Last known pointer position in screen space.
    pub fn pointer_position(&self) -> Point {
        self.pointer.get()
    }

    pub fn pointer_moved(&self) -> &Event<()> {
        &self.pointer_moved
    }

    pub fn pointer_released(&self) -> &Event<()> {
        &self.pointer_released
    }

    pub fn broadcast(&self, which: Broadcast) -> &Event<()> {
        match which {
            Broadcast::PointerMoved => &self.pointer_moved,
            Broadcast::PointerReleased => &self.pointer_released,
        }
    }

    /// Add a top-level widget and attach it to this desktop. A widget shown
    /// on another desktop is taken off that one first.
    pub fn add_widget(self: &Rc<Self>, widget: Rc<dyn Widget>) {
        let id = widget.id();
        if self.contains(id) {
            log::debug!("Widget {id:?} is already on the desktop");
            return;
        }
        if let Some(previous) = widget.desktop().filter(|d| !Rc::ptr_eq(d, self)) {
            log::debug!("Moving widget {id:?} to another desktop");
            previous.remove_widget(id);
        }
        self.widgets.borrow_mut().push(Rc::clone(&widget));
        widget.set_desktop(Some(self));
    }

    /// Remove a top-level widget and detach it. Returns the removed widget.
    pub fn remove_widget(&self, id: WidgetId) -> Option<Rc<dyn Widget>> {
        let removed = {
            let mut widgets = self.widgets.borrow_mut();
            let pos = widgets.iter().position(|w| w.id() == id)?;
            widgets.remove(pos)
        };
        {
            let mut target = self.touch_target.borrow_mut();
            if target.as_ref().is_some_and(|w| w.id() == id) {
                *target = None;
            }
        }
        removed.set_desktop(None);
        Some(removed)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.borrow().iter().any(|w| w.id() == id)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.borrow().len()
    }

    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focused.get()
    }

    pub fn set_focused_widget(&self, id: Option<WidgetId>) {
        self.focused.set(id);
    }

    fn snapshot(&self) -> Vec<Rc<dyn Widget>> {
        self.widgets.borrow().iter().map(Rc::clone).collect()
    }

    /// Run the layout pass over every top-level widget.
    pub fn update_layout(&self) {
        let placement = Placement::top_level(self.bounds());
        for widget in self.snapshot() {
            widget.arrange(placement);
        }
    }

    /// Feed one host input event.
    ///
    /// Presses go to the topmost widget under the pointer; the release goes
    /// back to the widget that took the press, then the pointer-released
    /// broadcast fires. Moves only update the pointer and broadcast.
    pub fn handle_input(&self, event: &InputEvent) {
        self.pointer.set(event.position());
        match event {
            InputEvent::CursorMove { .. } => {
                self.pointer_moved.emit(&());
            },
            InputEvent::PointerClick { .. } => {
                let pos = self.pointer_position();
                let target = self
                    .snapshot()
                    .into_iter()
                    .rev()
                    .find(|w| w.actual_bounds().contains(pos));
                if let Some(widget) = target {
                    if widget.can_focus() {
                        self.focused.set(Some(widget.id()));
                    }
                    *self.touch_target.borrow_mut() = Some(Rc::clone(&widget));
                    widget.on_touch_down();
                }
            },
            InputEvent::PointerRelease { .. } => {
                let target = self.touch_target.borrow_mut().take();
                if let Some(widget) = target {
                    widget.on_touch_up();
                }
                self.pointer_released.emit(&());
            },
        }
    }

    /// Draw every top-level widget, bottom to top.
    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        for widget in self.snapshot() {
            widget.draw(ctx)?;
        }
        Ok(())
    }
}

/// A widget's live subscriptions on one desktop.
///
/// Created on attach, consumed by [`Attachment::release`] on detach. Holds
/// the desktop weakly so a dropped desktop never stays alive through its
/// widgets.
#[derive(Debug)]
pub struct Attachment {
    desktop: Weak<Desktop>,
    handlers: Vec<(Broadcast, HandlerId)>,
}

impl Attachment {
    pub fn new(desktop: &Rc<Desktop>) -> Self {
        Self {
            desktop: Rc::downgrade(desktop),
            handlers: Vec::new(),
        }
    }

    /// Subscribe `handler` to one of the desktop's broadcasts.
    pub fn subscribe(&mut self, which: Broadcast, handler: impl FnMut(&()) + 'static) {
        if let Some(desktop) = self.desktop.upgrade() {
            let id = desktop.broadcast(which).subscribe(handler);
            self.handlers.push((which, id));
        }
    }

    pub fn desktop(&self) -> Option<Rc<Desktop>> {
        self.desktop.upgrade()
    }

    /// Unsubscribe everything this attachment registered.
    pub fn release(self) {
        let Some(desktop) = self.desktop.upgrade() else {
            return;
        };
        for (which, id) in self.handlers {
            desktop.broadcast(which).unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Probe;

    #[test]
    fn new_desktop_is_empty() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        assert_eq!(d.widget_count(), 0);
        assert!(d.focused_widget().is_none());
        assert_eq!(d.pointer_position(), Point::ZERO);
        assert!(d.pointer_moved().is_empty());
        assert!(d.pointer_released().is_empty());
    }

    #[test]
    fn add_attaches_and_remove_detaches() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        assert!(d.contains(probe.id()));
        assert!(probe.desktop().is_some());

        let removed = d.remove_widget(probe.id());
        assert!(removed.is_some());
        assert!(!d.contains(probe.id()));
        assert!(probe.desktop().is_none());
        assert!(d.remove_widget(probe.id()).is_none());
    }

    #[test]
    fn adding_twice_keeps_one_entry() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        d.add_widget(probe.clone().into_widget());
        assert_eq!(d.widget_count(), 1);
    }

    #[test]
    fn adding_to_second_desktop_leaves_the_first() {
        let first = Desktop::new(Rect::new(0, 0, 800, 600));
        let second = Desktop::new(Rect::new(0, 0, 800, 600));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        first.add_widget(probe.clone().into_widget());
        second.add_widget(probe.clone().into_widget());
        assert!(!first.contains(probe.id()));
        assert!(second.contains(probe.id()));
        assert!(probe.desktop().is_some_and(|d| Rc::ptr_eq(&d, &second)));

        first.handle_input(&InputEvent::PointerClick { x: 1, y: 1 });
        assert_eq!(probe.downs(), 0);
        second.handle_input(&InputEvent::PointerClick { x: 1, y: 1 });
        assert_eq!(probe.downs(), 1);
    }

    #[test]
    fn cursor_move_updates_pointer_and_broadcasts() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        d.pointer_moved().subscribe(move |_| s.set(s.get() + 1));
        d.handle_input(&InputEvent::CursorMove { x: 12, y: 34 });
        assert_eq!(d.pointer_position(), Point::new(12, 34));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn press_routes_to_topmost_widget_and_release_returns_to_it() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let below = Probe::new(Rect::new(0, 0, 100, 100));
        let above = Probe::new(Rect::new(50, 50, 100, 100));
        d.add_widget(below.clone().into_widget());
        d.add_widget(above.clone().into_widget());

        d.handle_input(&InputEvent::PointerClick { x: 60, y: 60 });
        assert_eq!(above.downs(), 1);
        assert_eq!(below.downs(), 0);

        d.handle_input(&InputEvent::PointerRelease { x: 5, y: 5 });
        assert_eq!(above.ups(), 1);
        assert_eq!(below.ups(), 0);
    }

    #[test]
    fn press_on_empty_area_hits_nothing() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        d.handle_input(&InputEvent::PointerClick { x: 400, y: 400 });
        d.handle_input(&InputEvent::PointerRelease { x: 400, y: 400 });
        assert_eq!(probe.downs(), 0);
        assert_eq!(probe.ups(), 0);
    }

    #[test]
    fn press_focuses_focusable_widget() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let probe = Probe::focusable(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        d.handle_input(&InputEvent::PointerClick { x: 1, y: 1 });
        assert_eq!(d.focused_widget(), Some(probe.id()));
    }

    #[test]
    fn release_broadcast_fires_without_target() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let seen = Rc::new(Cell::new(false));
        let s = Rc::clone(&seen);
        d.pointer_released().subscribe(move |_| s.set(true));
        d.handle_input(&InputEvent::PointerRelease { x: 0, y: 0 });
        assert!(seen.get());
    }

    #[test]
    fn attachment_release_unsubscribes_everything() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let mut a = Attachment::new(&d);
        a.subscribe(Broadcast::PointerMoved, |_| {});
        a.subscribe(Broadcast::PointerReleased, |_| {});
        assert_eq!(d.pointer_moved().len(), 1);
        assert_eq!(d.pointer_released().len(), 1);
        assert!(a.desktop().is_some_and(|x| Rc::ptr_eq(&x, &d)));
        a.release();
        assert!(d.pointer_moved().is_empty());
        assert!(d.pointer_released().is_empty());
    }

    #[test]
    fn attachment_outliving_desktop_releases_quietly() {
        let d = Desktop::new(Rect::new(0, 0, 800, 600));
        let mut a = Attachment::new(&d);
        a.subscribe(Broadcast::PointerMoved, |_| {});
        drop(d);
        assert!(a.desktop().is_none());
        a.release();
    }

    #[test]
    fn resized_viewport_reaches_next_layout() {
        let d = Desktop::new(Rect::new(0, 0, 640, 480));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        d.set_bounds(Rect::new(0, 0, 1024, 768));
        d.update_layout();
        assert_eq!(
            probe.last_placement(),
            Some(Placement::top_level(Rect::new(0, 0, 1024, 768)))
        );
    }

    #[test]
    fn update_layout_arranges_with_viewport() {
        let d = Desktop::new(Rect::new(0, 0, 640, 480));
        let probe = Probe::new(Rect::new(0, 0, 10, 10));
        d.add_widget(probe.clone().into_widget());
        d.update_layout();
        assert_eq!(
            probe.last_placement(),
            Some(Placement::top_level(Rect::new(0, 0, 640, 480)))
        );
    }
}
