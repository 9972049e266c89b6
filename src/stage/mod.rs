//! Scene, transition and popup orchestration.
//!
//! This module is the heart of the crate: named definitions go into
//! registries, and the [`Director`] runs the state machines that decide what
//! each frame shows.
//!
//! # Overview
//!
//! Three kinds of definitions exist, all registered under plain string names:
//! - [`SceneDef`]: a screen of the application, with load/unload lifecycle
//!   hooks plus per-frame update and draw hooks.
//! - [`TransitionDef`]: a scene change animation drawn in two legs, covering
//!   the outgoing scene and then uncovering the incoming one.
//! - [`PopupDef`]: a panel drawn on top of everything, at most one at a time.
//!
//! Names are resolved late, at the moment they are needed, and resolution
//! failures degrade instead of failing: an unknown scene falls back to the
//! configured fallback scene or the request is dropped; an unknown transition
//! falls back to the configured default or a built-in wipe; an unknown popup
//! request is ignored.
//!
//! # Example
//!
//! ```ignore
//! use skene::*;
//!
//! fn main() {
//!     let config = AppConfig::new().start_scene("menu").default_transition("fade");
//!
//!     run(config, |stage| {
//!         stage.define_transition("fade", TransitionDef::new().duration(0.4));
//!
//!         stage.define_scene("menu", SceneDef::new().on_update(|frame| {
//!             if frame.input.key_pressed(KeyCode::Space) {
//!                 frame.navigate("game");
//!             }
//!         }));
//!
//!         stage.define_scene("game", SceneDef::new().on_draw(|frame| {
//!             frame.rect(40.0, 40.0, 120.0, 120.0, Color::WHITE);
//!         }));
//!     })
//!     .unwrap();
//! }
//! ```

mod director;
mod popup;
mod registry;
mod scene;
mod transition;

pub use director::{Director, FrameScript, OverlayCue, StageError, WindowStatus};
pub use popup::PopupDef;
pub use registry::Registry;
pub use scene::SceneDef;
pub use transition::{TransitionDef, TransitionPhase};
