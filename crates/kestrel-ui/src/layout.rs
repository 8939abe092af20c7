//! Layout helpers: padding and centering.

use kestrel_types::geometry::Rect;
use serde::Deserialize;

/// Padding for all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Top padding in pixels.
    pub top: u16,
    /// Right padding in pixels.
    pub right: u16,
    /// Bottom padding in pixels.
    pub bottom: u16,
    /// Left padding in pixels.
    pub left: u16,
}

impl Padding {
    /// Zero padding on all sides.
    pub const ZERO: Self = Self::uniform(0);

    /// Create uniform padding on all sides.
    pub const fn uniform(p: u16) -> Self {
        Self {
            top: p,
            right: p,
            bottom: p,
            left: p,
        }
    }

    /// Create symmetric padding (horizontal and vertical).
    pub const fn symmetric(h: u16, v: u16) -> Self {
        Self {
            top: v,
            right: h,
            bottom: v,
            left: h,
        }
    }

    /// Compute the inner rectangle after applying padding.
    pub fn inner_rect(&self, r: Rect) -> Rect {
        Rect::new(
            r.x + i32::from(self.left),
            r.y + i32::from(self.top),
            (r.width - self.horizontal()).max(0),
            (r.height - self.vertical()).max(0),
        )
    }

    /// Total horizontal padding (left + right).
    pub fn horizontal(&self) -> i32 {
        i32::from(self.left) + i32::from(self.right)
    }

    /// Total vertical padding (top + bottom).
    pub fn vertical(&self) -> i32 {
        i32::from(self.top) + i32::from(self.bottom)
    }
}

/// Compute centered position of a child within a parent.
pub fn center(parent_size: i32, child_size: i32) -> i32 {
    ((parent_size - child_size) / 2).max(0)
}
