//! Per-frame context handed to scene, transition and popup hooks.

use glam::{UVec2, Vec2};

use crate::input::Input;
use crate::painter::{Color, Painter};

/// A request recorded by a hook, applied by the director between hook runs.
pub(crate) enum Action {
    /// Ask for a scene change, optionally naming the transition to use.
    Navigate {
        scene: String,
        transition: Option<String>,
    },
    /// Ask for a popup to be shown.
    Show(String),
    /// Ask for a popup to be hidden.
    Hide(String),
}

/// Everything a hook can see and do during one frame.
///
/// Hooks draw through [`Frame::rect`] and friends, read input through
/// [`Frame::input`], and steer the stage with [`Frame::navigate`],
/// [`Frame::show`] and [`Frame::hide`]. Steering calls only record the
/// request; the director applies them once the current batch of hooks has
/// finished, so no hook ever observes a half-changed stage.
pub struct Frame<'a> {
    /// Shape recorder for this frame.
    pub painter: &'a mut Painter,

    /// Keyboard and mouse state for this frame.
    pub input: &'a Input,

    /// Seconds since the window opened.
    pub time: f32,

    /// Seconds elapsed since the previous frame.
    pub dt: f32,

    /// Drawable size in physical pixels.
    pub size: UVec2,

    /// Per-axis scale of the drawable size relative to the configured size.
    pub scale: Vec2,

    /// Requests recorded by hooks this frame.
    pub(crate) actions: Vec<Action>,
}

impl<'a> Frame<'a> {
    pub fn new(
        painter: &'a mut Painter,
        input: &'a Input,
        time: f32,
        dt: f32,
        size: UVec2,
        scale: Vec2,
    ) -> Self {
        Self {
            painter,
            input,
            time,
            dt,
            size,
            scale,
            actions: Vec::new(),
        }
    }

    /// Drawable width in pixels.
    pub fn width(&self) -> f32 {
        self.size.x as f32
    }

    /// Drawable height in pixels.
    pub fn height(&self) -> f32 {
        self.size.y as f32
    }

    /// Frames per second implied by this frame's delta time.
    pub fn fps(&self) -> f32 {
        if self.dt > 0.0 { 1.0 / self.dt } else { 0.0 }
    }

    /// Set the color the frame is cleared to before any shape draws.
    pub fn clear_background(&mut self, color: Color) {
        self.painter.clear_background(color);
    }

    /// Draw an axis-aligned filled rectangle in pixel coordinates.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.painter.rect(x, y, width, height, color);
    }

    /// Request a change to `scene` using the default transition.
    pub fn navigate(&mut self, scene: &str) {
        self.actions.push(Action::Navigate {
            scene: scene.to_string(),
            transition: None,
        });
    }

    /// Request a change to `scene` using a specific transition.
    pub fn navigate_with(&mut self, scene: &str, transition: &str) {
        self.actions.push(Action::Navigate {
            scene: scene.to_string(),
            transition: Some(transition.to_string()),
        });
    }

    /// Request that `popup` be shown.
    pub fn show(&mut self, popup: &str) {
        self.actions.push(Action::Show(popup.to_string()));
    }

    /// Request that `popup` be hidden.
    pub fn hide(&mut self, popup: &str) {
        self.actions.push(Action::Hide(popup.to_string()));
    }
}
