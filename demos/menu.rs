//! Menu and gameplay scenes joined by a staggered-blinds transition.
//!
//! This example shows:
//! - Two scenes with load/unload hooks and per-frame drawing
//! - A named transition with custom enter and exit overlays
//! - Window listeners for scale changes and focus events
//!
//! Controls:
//! - SPACE: Start the game (uses the default "blinds" transition)
//! - ESCAPE: Back to the menu
//! - Resize the window to see the scale listener fire

use skene::{AppConfig, Color, Frame, KeyCode, SceneDef, TransitionDef, run};

fn main() {
    env_logger::init();

    let config = AppConfig::new()
        .title("Skene Menu")
        .size(900, 600)
        .start_scene("menu")
        .fallback_scene("menu")
        .default_transition("blinds");

    run(config, |stage| {
        // =========================================================
        // Transition: black slats sweep in from the left
        // =========================================================
        stage.define_transition(
            "blinds",
            TransitionDef::new()
                .duration(0.6)
                .on_enter(draw_blinds)
                .on_exit(draw_blinds),
        );

        // =========================================================
        // Scene 1: Menu
        // =========================================================
        stage.define_scene(
            "menu",
            SceneDef::new()
                .on_load(|| println!("menu loaded"))
                .on_unload(|| println!("menu unloaded"))
                .on_update(|frame| {
                    if frame.input.key_pressed(KeyCode::Space) {
                        frame.navigate("game");
                    }
                })
                .on_draw(|frame| {
                    frame.clear_background(Color::rgb(0.07, 0.08, 0.1));

                    // Three menu entries, the first one highlighted.
                    // Positions follow the scale factor so the layout
                    // tracks window resizes.
                    let scale = frame.scale;
                    for i in 0..3 {
                        let y = (140.0 + i as f32 * 90.0) * scale.y;
                        let lit = if i == 0 { 0.85 } else { 0.3 };
                        frame.rect(
                            90.0 * scale.x,
                            y,
                            340.0 * scale.x,
                            56.0 * scale.y,
                            Color::rgb(lit, lit, lit),
                        );
                    }
                }),
        );

        // =========================================================
        // Scene 2: Game
        // =========================================================
        stage.define_scene(
            "game",
            SceneDef::new()
                .on_update(|frame| {
                    if frame.input.key_pressed(KeyCode::Escape) {
                        frame.navigate_with("menu", "blinds");
                    }
                })
                .on_draw(|frame| {
                    frame.clear_background(Color::rgb(0.12, 0.05, 0.06));

                    // A square orbiting the center, driven by elapsed time.
                    let t = frame.time;
                    let cx = frame.width() * 0.5 + (t * 1.3).cos() * 180.0;
                    let cy = frame.height() * 0.5 + (t * 1.3).sin() * 180.0;
                    frame.rect(cx - 40.0, cy - 40.0, 80.0, 80.0, Color::rgb(0.9, 0.6, 0.2));
                }),
        );

        stage.on_scale(|scale, size| {
            println!("scale is now {:?} for {}x{}", scale, size.x, size.y);
        });
        stage.on_status(|status| {
            println!("window status: {:?}", status);
        });
    })
    .unwrap();
}

/// Eight horizontal slats, each sweeping across at a slightly offset pace.
fn draw_blinds(frame: &mut Frame, progress: f32) {
    let slats = 8;
    let width = frame.width();
    let slat_height = frame.height() / slats as f32;

    for i in 0..slats {
        let stagger = 0.12 * (i % 3) as f32;
        let p = (progress * 1.24 - stagger).clamp(0.0, 1.0);
        frame.rect(0.0, i as f32 * slat_height, width * p, slat_height, Color::BLACK);
    }
}
