//! Runtime configuration loaded from `kestrel.toml`.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KestrelConfig {
    pub desktop: DesktopConfig,
    pub slider: SliderConfig,
    pub window: WindowConfig,
}

/// Surface dimensions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Initial range and value for the demo slider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub minimum: f32,
    pub maximum: f32,
    pub value: f32,
    /// Use the `track * value / maximum` knob placement instead of the
    /// normalized one.
    pub legacy_offset_mapping: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            value: 0.0,
            legacy_offset_mapping: false,
        }
    }
}

/// Demo window setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Named window style from the stylesheet; `None` uses the default style.
    pub style: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kestrel".to_string(),
            style: None,
            width: None,
            height: None,
        }
    }
}

impl KestrelConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
