//! Scripted pointer session standing in for a real input backend.

use kestrel_types::geometry::Point;
use kestrel_types::input::InputEvent;
use kestrel_ui::Widget;

use crate::scene::Scene;

/// Press at `from`, move through `to`, release there.
fn drag(from: Point, to: Point) -> [InputEvent; 3] {
    [
        InputEvent::PointerClick {
            x: from.x,
            y: from.y,
        },
        InputEvent::CursorMove { x: to.x, y: to.y },
        InputEvent::PointerRelease { x: to.x, y: to.y },
    ]
}

/// Drag the knob to three quarters of the track, drag the window by its
/// header toward the top-left corner, then click the close button.
///
/// Coordinates come from the scene's current layout, so the script is
/// computed in stages as the window moves.
pub fn run(
    scene: &Scene,
    mut frame: impl FnMut(&InputEvent) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let knob = scene.slider.handle_bounds();
    let track = scene.slider.actual_bounds();
    let knob_center = Point::new(knob.x + knob.width / 2, knob.y + knob.height / 2);
    let target = Point::new(
        track.x + scene.slider.track_extent() * 3 / 4 + knob.width / 2,
        knob_center.y,
    );
    for event in drag(knob_center, target) {
        frame(&event)?;
    }

    let header = scene.window.header_bounds();
    let grab = header.origin() + Point::new(10, 10);
    for event in drag(grab, Point::new(40, 40)) {
        frame(&event)?;
    }
    log::info!("Window moved to {:?}", scene.window.position());

    let close = scene.window.close_button_bounds();
    let click = Point::new(close.x + close.width / 2, close.y + close.height / 2);
    frame(&InputEvent::PointerClick {
        x: click.x,
        y: click.y,
    })?;
    frame(&InputEvent::PointerRelease {
        x: click.x,
        y: click.y,
    })
}
