//! Kestrel demo entry point.
//!
//! Builds a desktop with one window hosting a slider, then replays a scripted
//! pointer session (knob drag, header drag, close click) against it, drawing
//! every frame into a headless backend. Notifications are logged; run with
//! `RUST_LOG=debug` to see attach/detach and drag traces.

mod headless;
mod scene;
mod session;

use anyhow::{Context, Result};

use headless::HeadlessBackend;
use kestrel_types::config::KestrelConfig;
use kestrel_ui::{DrawContext, Stylesheet};

const DEFAULT_STYLESHEET: &str = include_str!("../../../styles/default.toml");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Starting Kestrel demo ({}x{})",
        config.desktop.width,
        config.desktop.height,
    );

    let sheet = Stylesheet::from_toml_str(DEFAULT_STYLESHEET).context("built-in stylesheet")?;
    let scene = scene::build(&config, &sheet)?;

    let mut backend = HeadlessBackend::default();
    session::run(&scene, |event| {
        scene.desktop.handle_input(event);
        scene.desktop.update_layout();
        backend.begin_frame();
        scene.desktop.draw(&mut DrawContext::new(&mut backend))?;
        log::debug!(
            "{event:?}: {} fills, {} texts",
            backend.fills,
            backend.texts
        );
        Ok(())
    })?;

    log::info!(
        "Session done after {} frames; slider at {:.1}",
        backend.frames,
        scene.slider.value()
    );
    Ok(())
}

/// Config path from the first argument or `KESTREL_CONFIG`; defaults
/// otherwise.
fn load_config() -> Result<KestrelConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("KESTREL_CONFIG").ok());
    match path {
        Some(path) => {
            KestrelConfig::load(&path).with_context(|| format!("loading config {path}"))
        },
        None => Ok(KestrelConfig::default()),
    }
}
