//! Slider: a range control with one draggable knob.
//!
//! The stored value is authoritative. Every layout pass and every
//! programmatic assignment places the knob from the value (the forward
//! mapping). Pointer input is the single exception: there the knob offset is
//! computed first from the pointer, and the value is derived from that
//! offset (the reverse mapping). The knob is then left at the pixel offset
//! the pointer produced instead of being re-derived from the new value, so a
//! drag never jitters by a rounding pixel.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kestrel_types::color::Color;
use kestrel_types::error::Result;
use kestrel_types::geometry::{Orientation, Point, Rect, Size};

use crate::button::{ButtonState, ImageButton};
use crate::context::DrawContext;
use crate::desktop::{Attachment, Broadcast, Desktop};
use crate::event::{Event, ValueChanged};
use crate::layout;
use crate::style::{SliderStyle, Stylesheet};
use crate::widget::{Frame, Placement, Widget, WidgetId};

/// How a value is turned into a knob offset.
///
/// The reverse mapping (offset to value) is always
/// `minimum + offset * (maximum - minimum) / track`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMapping {
    /// `track * (value - minimum) / (maximum - minimum)`; the exact inverse
    /// of the reverse mapping.
    #[default]
    Normalized,
    /// `track * value / maximum`. Ignores `minimum`, so it disagrees with the
    /// reverse mapping whenever `minimum != 0`. Kept for layouts tuned
    /// against it.
    LegacyMaximumRatio,
}

impl OffsetMapping {
    /// Knob offset for `value` on a track of `track` pixels, in `[0, track]`.
    /// An empty range (or `maximum == 0` for the legacy mapping) puts the
    /// knob at 0.
    pub fn offset_for(self, value: f32, minimum: f32, maximum: f32, track: i32) -> i32 {
        let ratio = match self {
            OffsetMapping::Normalized => {
                let range = maximum - minimum;
                if range <= 0.0 {
                    return 0;
                }
                (value - minimum) / range
            },
            OffsetMapping::LegacyMaximumRatio => {
                if maximum == 0.0 {
                    return 0;
                }
                value / maximum
            },
        };
        let track = track.max(0);
        ((track as f32 * ratio) as i32).clamp(0, track)
    }
}

/// Value for a knob at `offset`, or `None` on a zero-length track.
pub fn value_for_offset(offset: i32, minimum: f32, maximum: f32, track: i32) -> Option<f32> {
    if track == 0 {
        return None;
    }
    Some(minimum + offset as f32 * (maximum - minimum) / track as f32)
}

/// A slider. Cloning yields another handle to the same slider.
#[derive(Debug, Clone)]
pub struct Slider {
    shared: Rc<SliderShared>,
}

#[derive(Debug)]
struct SliderShared {
    id: WidgetId,
    orientation: Orientation,
    state: RefCell<SliderState>,
    attachment: RefCell<Option<Attachment>>,
    value_changed: Event<ValueChanged<f32>>,
    value_changed_by_user: Event<ValueChanged<f32>>,
}

#[derive(Debug)]
struct SliderState {
    frame: Frame,
    knob: ImageButton,
    background: Option<Color>,
    minimum: f32,
    maximum: f32,
    value: f32,
    mapping: OffsetMapping,
}

impl SliderState {
    fn measure(&self, orientation: Orientation, available: Size) -> Size {
        let knob = self.knob.measure();
        let natural = match orientation {
            Orientation::Horizontal => Size::new(available.width, knob.height),
            Orientation::Vertical => Size::new(knob.width, available.height),
        };
        self.frame.resolve_size(natural)
    }

    fn track_extent(&self, orientation: Orientation) -> i32 {
        let own = self.frame.bounds().size().along(orientation);
        let knob = self.knob.frame.bounds().size().along(orientation);
        (own - knob).max(0)
    }

    fn handle_offset(&self, orientation: Orientation) -> i32 {
        self.knob.frame.position().along(orientation)
    }

    fn set_handle_offset(&mut self, orientation: Orientation, offset: i32) {
        let p = self.knob.frame.position();
        let p = match orientation {
            Orientation::Horizontal => Point::new(offset, p.y),
            Orientation::Vertical => Point::new(p.x, offset),
        };
        self.knob.frame.set_position(p);
    }

    fn sync_handle_with_value(&mut self, orientation: Orientation) {
        let track = self.track_extent(orientation);
        let offset = self
            .mapping
            .offset_for(self.value, self.minimum, self.maximum, track);
        self.set_handle_offset(orientation, offset);
    }
}

impl Slider {
    /// Create a slider with the built-in default style.
    pub fn new(orientation: Orientation) -> Self {
        Self::with_style(orientation, &SliderStyle::default())
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_style(orientation: Orientation, style: &SliderStyle) -> Self {
        let slider = Self {
            shared: Rc::new(SliderShared {
                id: WidgetId::next(),
                orientation,
                state: RefCell::new(SliderState {
                    frame: Frame::default(),
                    knob: ImageButton::default(),
                    background: None,
                    minimum: 0.0,
                    maximum: 100.0,
                    value: 0.0,
                    mapping: OffsetMapping::default(),
                }),
                attachment: RefCell::new(None),
                value_changed: Event::new(),
                value_changed_by_user: Event::new(),
            }),
        };
        slider.apply_style(style);
        slider
    }

    /// Create a slider styled by the named entry of `sheet`.
    pub fn from_stylesheet(sheet: &Stylesheet, orientation: Orientation, name: &str) -> Result<Self> {
        let style = sheet.slider_style(orientation, name)?;
        Ok(Self::with_style(orientation, style))
    }

    /// Apply track and knob styling. Applying the same style again changes
    /// nothing.
    pub fn apply_style(&self, style: &SliderStyle) {
        let mut s = self.shared.state.borrow_mut();
        s.background = style.background;
        s.frame.width = style.width;
        s.frame.height = style.height;
        s.knob.apply_style(&style.knob);
    }

    /// Wrap this handle for a widget collection.
    pub fn as_widget(&self) -> Rc<dyn Widget> {
        Rc::new(self.clone())
    }

    pub fn orientation(&self) -> Orientation {
        self.shared.orientation
    }

    pub fn minimum(&self) -> f32 {
        self.shared.state.borrow().minimum
    }

    /// Set the lower bound. The stored value is not re-clamped; only writes
    /// to the value clamp.
    pub fn set_minimum(&self, minimum: f32) {
        let mut s = self.shared.state.borrow_mut();
        s.minimum = minimum;
        s.sync_handle_with_value(self.shared.orientation);
    }

    pub fn maximum(&self) -> f32 {
        self.shared.state.borrow().maximum
    }

    /// Set the upper bound. The stored value is not re-clamped.
    pub fn set_maximum(&self, maximum: f32) {
        let mut s = self.shared.state.borrow_mut();
        s.maximum = maximum;
        s.sync_handle_with_value(self.shared.orientation);
    }

    pub fn value(&self) -> f32 {
        self.shared.state.borrow().value
    }

    /// Assign the value programmatically.
    ///
    /// Out-of-range values are clamped to the nearest bound and NaN is
    /// ignored. Assigning the stored value again is a no-op; any real change
    /// moves the knob and fires `value_changed` (but not
    /// `value_changed_by_user`).
    pub fn set_value(&self, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN slider value");
            return;
        }
        let change = {
            let mut s = self.shared.state.borrow_mut();
            let mut value = value;
            if value > s.maximum {
                value = s.maximum;
            }
            if value < s.minimum {
                value = s.minimum;
            }
            if s.value == value {
                return;
            }
            let old = s.value;
            s.value = value;
            s.sync_handle_with_value(self.shared.orientation);
            ValueChanged { old, new: value }
        };
        self.shared.value_changed.emit(&change);
    }

    pub fn offset_mapping(&self) -> OffsetMapping {
        self.shared.state.borrow().mapping
    }

    pub fn set_offset_mapping(&self, mapping: OffsetMapping) {
        let mut s = self.shared.state.borrow_mut();
        s.mapping = mapping;
        s.sync_handle_with_value(self.shared.orientation);
    }

    /// Knob offset along the slider axis, in pixels.
    pub fn handle_offset(&self) -> i32 {
        self.shared
            .state
            .borrow()
            .handle_offset(self.shared.orientation)
    }

    /// Pixel span the knob can travel.
    pub fn track_extent(&self) -> i32 {
        self.shared
            .state
            .borrow()
            .track_extent(self.shared.orientation)
    }

    /// Knob bounds in screen space.
    pub fn handle_bounds(&self) -> Rect {
        self.shared.state.borrow().knob.frame.actual_bounds()
    }

    /// Whether the knob is held by the pointer.
    pub fn is_dragging(&self) -> bool {
        self.shared.state.borrow().knob.is_pressed()
    }

    /// Fires on every value change, programmatic or pointer-driven.
    pub fn value_changed(&self) -> &Event<ValueChanged<f32>> {
        &self.shared.value_changed
    }

    /// Fires only for changes made with the pointer.
    pub fn value_changed_by_user(&self) -> &Event<ValueChanged<f32>> {
        &self.shared.value_changed_by_user
    }

    pub fn set_position(&self, position: Point) {
        self.shared.state.borrow_mut().frame.set_position(position);
    }

    pub fn set_size(&self, width: Option<i32>, height: Option<i32>) {
        let mut s = self.shared.state.borrow_mut();
        s.frame.width = width;
        s.frame.height = height;
    }

    /// Move the knob under the pointer and derive the value from it.
    fn update_from_pointer(&self) {
        let Some(desktop) = self.desktop() else {
            return;
        };
        let pointer = desktop.pointer_position();
        let orientation = self.shared.orientation;
        let change = {
            let mut s = self.shared.state.borrow_mut();
            let track = s.track_extent(orientation);
            let origin = s.frame.actual_bounds().origin().along(orientation);
            let half_knob = s.knob.frame.actual_bounds().size().along(orientation) / 2;
            let offset = (pointer.along(orientation) - origin - half_knob).clamp(0, track);

            let old = s.value;
            let change = value_for_offset(offset, s.minimum, s.maximum, track)
                .filter(|new| *new != old)
                .map(|new| ValueChanged { old, new });
            if let Some(change) = change {
                s.value = change.new;
            }
            // Placed from the pointer, not from the new value.
            s.set_handle_offset(orientation, offset);
            change
        };
        if let Some(change) = change {
            log::trace!(
                "Slider {:?} dragged {} -> {}",
                self.shared.id,
                change.old,
                change.new
            );
            self.shared.value_changed.emit(&change);
            self.shared.value_changed_by_user.emit(&change);
        }
    }

    fn on_desktop_pointer_moved(&self) {
        if !self.is_dragging() {
            return;
        }
        self.update_from_pointer();
    }
}

impl Widget for Slider {
    fn id(&self) -> WidgetId {
        self.shared.id
    }

    fn measure(&self, available: Size) -> Size {
        self.shared
            .state
            .borrow()
            .measure(self.shared.orientation, available)
    }

    fn arrange(&self, placement: Placement) {
        let orientation = self.shared.orientation;
        let mut s = self.shared.state.borrow_mut();
        let measured = s.measure(orientation, placement.container.size());
        s.frame.arrange(placement, measured);

        let bounds = s.frame.actual_bounds();
        let knob = s.knob.measure();
        match orientation {
            Orientation::Horizontal => s.knob.frame.top = layout::center(bounds.height, knob.height),
            Orientation::Vertical => s.knob.frame.left = layout::center(bounds.width, knob.width),
        }
        s.knob.arrange(Placement::in_parent(bounds));
        s.sync_handle_with_value(orientation);
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
            log::debug!("Slider {:?} detached", self.shared.id);
        }
        // Detaching ends any press in progress.
        {
            let mut s = self.shared.state.borrow_mut();
            if s.knob.is_pressed() {
                s.knob.state = ButtonState::Normal;
            }
        }
        let Some(desktop) = desktop else {
            return;
        };
        let mut attachment = Attachment::new(desktop);
        let weak: Weak<SliderShared> = Rc::downgrade(&self.shared);
        attachment.subscribe(Broadcast::PointerMoved, move |_| {
            if let Some(shared) = weak.upgrade() {
                Slider { shared }.on_desktop_pointer_moved();
            }
        });
        *self.shared.attachment.borrow_mut() = Some(attachment);
        log::debug!("Slider {:?} attached", self.shared.id);
    }

    fn on_touch_down(&self) {
        self.update_from_pointer();
        self.shared.state.borrow_mut().knob.press();
    }

    fn on_touch_up(&self) {
        let pointer = self
            .desktop()
            .map(|d| d.pointer_position())
            .unwrap_or_default();
        self.shared.state.borrow_mut().knob.release(pointer);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let s = self.shared.state.borrow();
        if let Some(bg) = s.background {
            ctx.backend.fill(s.frame.actual_bounds(), bg)?;
        }
        s.knob.draw(ctx)
    }
}
