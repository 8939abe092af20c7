//! Foundation types for Kestrel.
//!
//! This crate contains the platform-agnostic core types shared by all Kestrel
//! crates: colors, integer geometry, pointer input events, the draw backend
//! trait, configuration, and error types.

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;

pub use color::Color;
pub use error::{KestrelError, Result};
pub use geometry::{Orientation, Point, Rect, Size};
