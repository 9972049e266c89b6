//! Popup definitions and the popup lifecycle bookkeeping.

use crate::Frame;

/// A named panel drawn on top of everything else.
///
/// At most one popup is shown at a time. Showing a second popup hides the
/// first. While shown, the popup's update and draw hooks run every frame
/// after the scene and any transition overlay.
pub struct PopupDef {
    /// Fires once when the popup becomes shown.
    pub(crate) on_show: Option<Box<dyn FnMut()>>,

    /// Fires once when the popup stops being shown.
    pub(crate) on_hide: Option<Box<dyn FnMut()>>,

    /// Fires once per tick while shown.
    pub(crate) on_update: Option<Box<dyn FnMut(&mut Frame)>>,

    /// Fires once per frame while shown, after the scene and overlay.
    pub(crate) on_draw: Option<Box<dyn FnMut(&mut Frame)>>,
}

impl PopupDef {
    /// Create a popup with no hooks set.
    pub fn new() -> Self {
        Self {
            on_show: None,
            on_hide: None,
            on_update: None,
            on_draw: None,
        }
    }

    /// Set a callback to run when this popup becomes shown.
    pub fn on_show<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_show = Some(Box::new(callback));
        self
    }

    /// Set a callback to run when this popup stops being shown.
    pub fn on_hide<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_hide = Some(Box::new(callback));
        self
    }

    /// Set the per-tick logic callback.
    pub fn on_update<F: FnMut(&mut Frame) + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Set the per-frame drawing callback.
    pub fn on_draw<F: FnMut(&mut Frame) + 'static>(mut self, callback: F) -> Self {
        self.on_draw = Some(Box::new(callback));
        self
    }

    /// Call the show callback if set.
    pub(crate) fn show(&mut self) {
        if let Some(ref mut callback) = self.on_show {
            callback();
        }
    }

    /// Call the hide callback if set.
    pub(crate) fn hide(&mut self) {
        if let Some(ref mut callback) = self.on_hide {
            callback();
        }
    }

    /// Call the update callback if set.
    pub(crate) fn update(&mut self, frame: &mut Frame) {
        if let Some(ref mut callback) = self.on_update {
            callback(frame);
        }
    }

    /// Call the draw callback if set.
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        if let Some(ref mut callback) = self.on_draw {
            callback(frame);
        }
    }
}

impl Default for PopupDef {
    fn default() -> Self {
        Self::new()
    }
}

/// Step the popup lifecycle is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PopupPhase {
    /// A show was requested. The swap to `target` happens next tick.
    Show,
    /// The popup in `current` is shown, updating and drawing each frame.
    Active,
    /// A hide was requested. The hide hook fires next tick.
    Hide,
}

/// Which popup is shown and which one was asked for.
#[derive(Default)]
pub(crate) struct PopupState {
    /// Lifecycle step, or `None` when no popup is up.
    pub phase: Option<PopupPhase>,

    /// Popup currently shown.
    pub current: Option<String>,

    /// Popup a pending show will swap in.
    pub target: Option<String>,
}
