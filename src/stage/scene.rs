//! Scene definitions and the scene name bookkeeping.

use crate::Frame;

/// A named screen of the application.
///
/// Scenes bundle lifecycle hooks with per-frame logic and drawing. Any subset
/// of hooks may be omitted; the missing ones simply never fire.
///
/// # Example
///
/// ```ignore
/// stage.define_scene("menu", SceneDef::new()
///     .on_load(|| println!("menu ready"))
///     .on_update(|frame| {
///         if frame.input.key_pressed(KeyCode::Space) {
///             frame.navigate("game");
///         }
///     })
///     .on_draw(|frame| frame.rect(40.0, 40.0, 200.0, 60.0, Color::WHITE)));
/// ```
pub struct SceneDef {
    /// Fires when the scene becomes current.
    pub(crate) on_load: Option<Box<dyn FnMut()>>,

    /// Fires when the scene stops being current.
    pub(crate) on_unload: Option<Box<dyn FnMut()>>,

    /// Fires once per tick while the scene is current.
    pub(crate) on_update: Option<Box<dyn FnMut(&mut Frame)>>,

    /// Fires once per frame while the scene is current, before any overlay.
    pub(crate) on_draw: Option<Box<dyn FnMut(&mut Frame)>>,
}

impl SceneDef {
    /// Create a scene with no hooks set.
    pub fn new() -> Self {
        Self {
            on_load: None,
            on_unload: None,
            on_update: None,
            on_draw: None,
        }
    }

    /// Set a callback to run when this scene becomes current.
    pub fn on_load<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Set a callback to run when this scene stops being current.
    pub fn on_unload<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_unload = Some(Box::new(callback));
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

    /// Call the load callback if set.
    pub(crate) fn load(&mut self) {
        if let Some(ref mut callback) = self.on_load {
            callback();
        }
    }

    /// Call the unload callback if set.
    pub(crate) fn unload(&mut self) {
        if let Some(ref mut callback) = self.on_unload {
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

impl Default for SceneDef {
    fn default() -> Self {
        Self::new()
    }
}

/// Which scene is shown, which one a transition is heading to, and which one
/// was asked for most recently.
#[derive(Default)]
pub(crate) struct SceneState {
    /// Scene currently shown and updated each frame.
    pub current: Option<String>,

    /// Scene a running transition will commit to.
    pub target: Option<String>,

    /// Most recent navigation request, consumed when a transition starts.
    pub pending: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn hooks_fire_when_set() {
        let loads = Rc::new(RefCell::new(0));
        let unloads = Rc::new(RefCell::new(0));

        let l = Rc::clone(&loads);
        let u = Rc::clone(&unloads);
        let mut scene = SceneDef::new()
            .on_load(move || *l.borrow_mut() += 1)
            .on_unload(move || *u.borrow_mut() += 1);

        scene.load();
        scene.load();
        scene.unload();

        assert_eq!(*loads.borrow(), 2);
        assert_eq!(*unloads.borrow(), 1);
    }

    #[test]
    fn missing_hooks_are_noops() {
        let mut scene = SceneDef::new();
        scene.load();
        scene.unload();
    }
}
