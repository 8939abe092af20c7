//! Builds the demo scene: one window on a desktop, hosting a slider.

use std::rc::Rc;

use anyhow::{Context, Result};
use kestrel_types::config::KestrelConfig;
use kestrel_types::geometry::{Orientation, Rect};
use kestrel_ui::style::DEFAULT_STYLE_NAME;
use kestrel_ui::{Desktop, OffsetMapping, Slider, Stylesheet};
use kestrel_wm::Window;

pub struct Scene {
    pub desktop: Rc<Desktop>,
    pub window: Window,
    pub slider: Slider,
}

pub fn build(config: &KestrelConfig, sheet: &Stylesheet) -> Result<Scene> {
    let desktop = Desktop::new(Rect::new(
        0,
        0,
        config.desktop.width,
        config.desktop.height,
    ));

    let style = config.window.style.as_deref().unwrap_or(DEFAULT_STYLE_NAME);
    let window = Window::from_stylesheet(sheet, style).with_context(|| {
        format!(
            "window style '{style}' (available: {})",
            sheet.window_style_names().join(", ")
        )
    })?;
    window.set_title(config.window.title.as_str());
    if config.window.width.is_some() || config.window.height.is_some() {
        window.set_size(config.window.width, config.window.height);
    }

    let slider = Slider::from_stylesheet(sheet, Orientation::Horizontal, DEFAULT_STYLE_NAME)?;
    slider.set_minimum(config.slider.minimum);
    slider.set_maximum(config.slider.maximum);
    if config.slider.legacy_offset_mapping {
        slider.set_offset_mapping(OffsetMapping::LegacyMaximumRatio);
    }
    slider.set_value(config.slider.value);

    slider.value_changed().subscribe(|c| {
        log::info!("Slider value {:.1} -> {:.1}", c.old, c.new);
    });
    slider.value_changed_by_user().subscribe(|c| {
        log::info!("  (by user, now {:.1})", c.new);
    });
    let title = config.window.title.clone();
    window.closed().subscribe(move |_| {
        log::info!("Window '{title}' closed");
    });

    window.set_content(Some(slider.as_widget()));
    window.show_modal(&desktop);
    desktop.update_layout();

    Ok(Scene {
        desktop,
        window,
        slider,
    })
}
