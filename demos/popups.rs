//! A pause popup layered over a running scene.
//!
//! This example shows:
//! - A popup with show/hide hooks and its own update and draw callbacks
//! - The scene continuing to animate underneath an open popup
//! - Popups drawing last, on top of everything else
//!
//! Controls:
//! - P: Open the pause popup
//! - ESCAPE: Close it again

use skene::{AppConfig, Color, KeyCode, PopupDef, SceneDef, run};

fn main() {
    env_logger::init();

    let config = AppConfig::new()
        .title("Skene Popups")
        .size(900, 600)
        .start_scene("arena");

    run(config, |stage| {
        stage.define_scene(
            "arena",
            SceneDef::new()
                .on_update(|frame| {
                    if frame.input.key_pressed(KeyCode::KeyP) {
                        frame.show("pause");
                    }
                })
                .on_draw(|frame| {
                    frame.clear_background(Color::rgb(0.05, 0.09, 0.07));

                    // The ball keeps bouncing while the popup is open,
                    // which makes the draw order easy to see.
                    let t = frame.time;
                    let x = (t * 0.7).sin().abs() * (frame.width() - 80.0);
                    let y = (t * 1.1).sin().abs() * (frame.height() - 80.0);
                    frame.rect(x, y, 80.0, 80.0, Color::rgb(0.3, 0.8, 0.5));
                }),
        );

        stage.define_popup(
            "pause",
            PopupDef::new()
                .on_show(|| println!("paused"))
                .on_hide(|| println!("resumed"))
                .on_update(|frame| {
                    if frame.input.key_pressed(KeyCode::Escape) {
                        frame.hide("pause");
                    }
                })
                .on_draw(|frame| {
                    let w = frame.width();
                    let h = frame.height();

                    // Dim everything underneath, then draw the panel.
                    frame.rect(0.0, 0.0, w, h, Color::rgba(0.0, 0.0, 0.0, 0.6));

                    let pw = 360.0;
                    let ph = 180.0;
                    let px = (w - pw) * 0.5;
                    let py = (h - ph) * 0.5;
                    frame.rect(px, py, pw, ph, Color::rgb(0.16, 0.17, 0.2));
                    frame.rect(px, py, pw, 44.0, Color::rgb(0.25, 0.27, 0.32));
                }),
        );
    })
    .unwrap();
}
