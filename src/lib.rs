//! # Skene
//!
//! **Scene, transition and popup orchestration for real-time windows.**
//!
//! Define named scenes, wire them together with timed transitions, layer
//! popups on top, and let the stage drive the frame loop. Hooks are plain
//! closures; the stage calls them in a fixed order every frame.
//!
//! ## Quick Start
//!
//! ```no_run
//! use skene::*;
//!
//! fn main() {
//!     let config = AppConfig::new()
//!         .title("Hello Stage")
//!         .size(960, 540)
//!         .start_scene("menu");
//!
//!     run(config, |stage| {
//!         stage.define_scene(
//!             "menu",
//!             SceneDef::new()
//!                 .on_update(|frame| {
//!                     if frame.input.key_pressed(KeyCode::Space) {
//!                         frame.navigate("game");
//!                     }
//!                 })
//!                 .on_draw(|frame| {
//!                     frame.clear_background(Color::rgb(0.08, 0.08, 0.1));
//!                     frame.rect(60.0, 60.0, 240.0, 80.0, Color::WHITE);
//!                 }),
//!         );
//!
//!         stage.define_scene(
//!             "game",
//!             SceneDef::new().on_draw(|frame| {
//!                 frame.clear_background(Color::rgb(0.25, 0.1, 0.1));
//!             }),
//!         );
//!     })
//!     .unwrap();
//! }
//! ```
//!
//! ## Philosophy
//!
//! - **Names over handles**: scenes, transitions and popups are addressed by
//!   string name, and a name that was never defined degrades instead of crashing.
//! - **Latest request wins**: navigation calls overwrite each other until a
//!   transition actually starts.
//! - **Closures, no traits**: lifecycle, update and draw hooks are plain `FnMut`
//!   closures with no state machine to implement.
//! - **Escape hatches**: the underlying `wgpu` device and queue stay reachable
//!   through `GpuContext`.
//!
//! Run the bundled demos with `cargo run --example menu` or
//! `cargo run --example popups`.

mod app;
mod canvas;
mod config;
mod frame;
mod gpu;
mod input;
mod painter;
pub mod stage;

pub use app::{RunError, run};
pub use canvas::Canvas;
pub use config::AppConfig;
pub use frame::Frame;
pub use gpu::GpuContext;
pub use input::Input;
pub use painter::{Color, Painter, PainterPass, Vertex2d};
pub use stage::{
    Director, FrameScript, OverlayCue, PopupDef, Registry, SceneDef, StageError, TransitionDef,
    TransitionPhase, WindowStatus,
};

// Re-export glam math types for convenience
pub use glam::{UVec2, Vec2};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
