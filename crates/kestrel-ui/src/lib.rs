//! kestrel-ui: retained-mode interactive widgets.
//!
//! Widgets are cheap `Rc` handles with interior state. They take part in the
//! layout pass through [`Widget::arrange`], receive pointer presses routed by
//! the [`Desktop`], and listen to its pointer broadcasts only while attached
//! to it. All rendering goes through `DrawBackend` -- no platform code here.

pub mod button;
pub mod context;
pub mod desktop;
pub mod event;
pub mod label;
pub mod layout;
pub mod slider;
pub mod style;
pub mod widget;

#[cfg(test)]
pub(crate) mod test_utils;

pub use context::DrawContext;
pub use desktop::{Attachment, Broadcast, Desktop};
pub use event::{Event, HandlerId, ValueChanged};
pub use layout::Padding;
pub use slider::{OffsetMapping, Slider};
pub use style::Stylesheet;
pub use widget::{Frame, Placement, Widget, WidgetId};
