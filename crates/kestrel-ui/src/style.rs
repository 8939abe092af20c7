//! Style bundles and the stylesheet that names them.
//!
//! Styles are plain data. Widgets copy what they need in `apply_style`, so
//! applying the same style twice leaves the widget unchanged. Stylesheets
//! load from TOML or JSON; colors are `#RRGGBB` / `#RRGGBBAA` strings.

use std::collections::HashMap;
use std::path::Path;

use kestrel_types::color::Color;
use kestrel_types::error::{KestrelError, Result};
use kestrel_types::geometry::Orientation;
use serde::Deserialize;

use crate::layout::Padding;

/// Name that always resolves to a stylesheet's default style.
pub const DEFAULT_STYLE_NAME: &str = "default";

/// Style of a pressable image button (slider knob, close button).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageButtonStyle {
    pub background: Option<Color>,
    pub pressed_background: Option<Color>,
    pub width: i32,
    pub height: i32,
}

impl Default for ImageButtonStyle {
    fn default() -> Self {
        Self {
            background: Some(Color::rgb(80, 160, 255)),
            pressed_background: Some(Color::rgb(60, 130, 220)),
            width: 16,
            height: 16,
        }
    }
}

/// Style of a text label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub text_color: Color,
    pub font_size: u16,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text_color: Color::rgb(230, 230, 240),
            font_size: 8,
        }
    }
}

/// Style of a slider and its knob.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Track fill.
    pub background: Option<Color>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub knob: ImageButtonStyle,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            background: Some(Color::rgb(40, 40, 55)),
            width: None,
            height: None,
            knob: ImageButtonStyle::default(),
        }
    }
}

/// Style of a window, its title and its close button.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowStyle {
    pub background: Option<Color>,
    pub padding: Padding,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Minimum header height; the header is never shorter than its title or
    /// close button.
    pub title_height: Option<i32>,
    /// Gap between header and content rows.
    pub row_spacing: i32,
    /// Left untouched when absent.
    pub title: Option<LabelStyle>,
    /// Left untouched when absent.
    pub close_button: Option<ImageButtonStyle>,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            background: Some(Color::rgb(30, 30, 40)),
            padding: Padding::uniform(8),
            width: None,
            height: None,
            title_height: None,
            row_spacing: 8,
            title: Some(LabelStyle::default()),
            close_button: Some(ImageButtonStyle {
                background: Some(Color::rgb(50, 50, 70)),
                pressed_background: Some(Color::rgb(40, 40, 55)),
                width: 16,
                height: 16,
            }),
        }
    }
}

/// Default styles plus named variants for each widget kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Stylesheet {
    pub horizontal_slider: SliderStyle,
    pub vertical_slider: SliderStyle,
    pub window: WindowStyle,
    pub horizontal_slider_styles: HashMap<String, SliderStyle>,
    pub vertical_slider_styles: HashMap<String, SliderStyle>,
    pub window_styles: HashMap<String, WindowStyle>,
}

impl Stylesheet {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a stylesheet file; `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let sheet = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        log::debug!(
            "Loaded stylesheet {} ({} window styles)",
            path.display(),
            sheet.window_styles.len()
        );
        Ok(sheet)
    }

    /// Look up a window style by name.
    pub fn window_style(&self, name: &str) -> Result<&WindowStyle> {
        lookup(&self.window, &self.window_styles, name, "window")
    }

    /// Look up a slider style by orientation and name.
    pub fn slider_style(&self, orientation: Orientation, name: &str) -> Result<&SliderStyle> {
        match orientation {
            Orientation::Horizontal => lookup(
                &self.horizontal_slider,
                &self.horizontal_slider_styles,
                name,
                "horizontal slider",
            ),
            Orientation::Vertical => lookup(
                &self.vertical_slider,
                &self.vertical_slider_styles,
                name,
                "vertical slider",
            ),
        }
    }

    /// Sorted names usable with [`Stylesheet::window_style`].
    pub fn window_style_names(&self) -> Vec<&str> {
        names(&self.window_styles)
    }

    /// Sorted names usable with [`Stylesheet::slider_style`].
    pub fn slider_style_names(&self, orientation: Orientation) -> Vec<&str> {
        match orientation {
            Orientation::Horizontal => names(&self.horizontal_slider_styles),
            Orientation::Vertical => names(&self.vertical_slider_styles),
        }
    }
}

fn lookup<'a, T>(
    default: &'a T,
    named: &'a HashMap<String, T>,
    name: &str,
    kind: &str,
) -> Result<&'a T> {
    if let Some(style) = named.get(name) {
        return Ok(style);
    }
    if name == DEFAULT_STYLE_NAME {
        return Ok(default);
    }
    log::warn!("Unknown {kind} style: {name}");
    Err(KestrelError::Style(format!("unknown {kind} style '{name}'")))
}

fn names<T>(map: &HashMap<String, T>) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    if !map.contains_key(DEFAULT_STYLE_NAME) {
        names.push(DEFAULT_STYLE_NAME);
    }
    names.sort_unstable();
    names
}
