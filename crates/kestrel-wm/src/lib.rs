//! kestrel-wm: windows for the Kestrel desktop.
//!
//! A [`Window`] is a two-row container: a title bar (title label plus close
//! button) and one content widget. Dragging the title bar moves the window
//! inside its parent area, and the first layout pass after attaching centers
//! it on its container.

pub mod title_bar;
pub mod window;

#[cfg(test)]
pub(crate) mod test_utils;

pub use title_bar::TitleBar;
pub use window::Window;
