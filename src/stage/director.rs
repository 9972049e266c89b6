//! Scene handover, transition timing, popups and window status dispatch.

use glam::{UVec2, Vec2};
use log::{debug, warn};

use crate::config::AppConfig;
use crate::frame::{Action, Frame};
use crate::painter::Color;
use crate::stage::popup::{PopupDef, PopupPhase, PopupState};
use crate::stage::registry::Registry;
use crate::stage::scene::{SceneDef, SceneState};
use crate::stage::transition::{
    DEFAULT_DURATION, TransitionDef, TransitionEvent, TransitionPhase, TransitionState,
};

/// Lifecycle notification delivered to status listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStatus {
    /// The window exists and the stage is about to run.
    Open,
    /// The event loop is ending.
    Close,
    /// The window gained keyboard focus.
    Focus,
    /// The window lost keyboard focus.
    Blur,
}

/// Errors the stage can report before the event loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// Neither the configured start scene nor a registered fallback exists.
    NoStartScene(String),
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::NoStartScene(name) => {
                write!(f, "Scene '{name}' was not defined and no fallback was stated")
            }
        }
    }
}

impl std::error::Error for StageError {}

/// What one frame should draw, in order.
///
/// Produced by [`Director::tick`] and consumed by [`Director::perform`].
/// Every name has already been checked against its registry, so a `Some`
/// entry is always drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameScript {
    /// Scene drawn first.
    pub scene: Option<String>,

    /// Transition overlay drawn over the scene, when one is mid-flight.
    pub overlay: Option<OverlayCue>,

    /// Popup drawn on top of everything.
    pub popup: Option<String>,
}

/// The transition overlay portion of a [`FrameScript`].
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayCue {
    /// Transition whose hooks draw the overlay. `None` draws the built-in
    /// left-to-right wipe.
    pub transition: Option<String>,

    /// Leg being drawn.
    pub phase: TransitionPhase,

    /// Normalized progress for the leg, in `[0, 1]`.
    pub progress: f32,
}

/// Owns the scene, transition and popup registries and runs their state
/// machines.
///
/// The director splits each frame in two. [`Director::tick`] runs logic:
/// the current scene's update hook, any navigation or popup requests those
/// hooks recorded, the transition clock, and scale bookkeeping. It returns a
/// [`FrameScript`] naming what to draw. [`Director::perform`] then runs the
/// draw hooks in strict order: scene, then transition overlay, then popup.
///
/// Navigation is forgiving. A request naming an unknown scene falls back to
/// the configured fallback scene or is dropped with a warning; an unknown
/// transition name falls back to the configured default or to a built-in
/// wipe. The only hard error is failing to resolve a start scene in
/// [`Director::start`].
pub struct Director {
    scenes: Registry<SceneDef>,
    transitions: Registry<TransitionDef>,
    popups: Registry<PopupDef>,

    scene: SceneState,
    transition: TransitionState,
    popup: PopupState,

    fallback_scene: Option<String>,
    default_transition: Option<String>,

    /// Configured window size, the reference for scale ratios.
    baseline: UVec2,
    last_size: UVec2,
    scale: Vec2,

    scale_listeners: Vec<Box<dyn FnMut(Vec2, UVec2)>>,
    status_listeners: Vec<Box<dyn FnMut(WindowStatus)>>,
}

impl Director {
    pub fn new() -> Self {
        Self {
            scenes: Registry::new(),
            transitions: Registry::new(),
            popups: Registry::new(),
            scene: SceneState::default(),
            transition: TransitionState::new(),
            popup: PopupState::default(),
            fallback_scene: None,
            default_transition: None,
            baseline: UVec2::ZERO,
            last_size: UVec2::ZERO,
            scale: Vec2::ONE,
            scale_listeners: Vec::new(),
            status_listeners: Vec::new(),
        }
    }

    /// Register a scene under `name`, replacing any previous definition.
    pub fn define_scene(&mut self, name: impl Into<String>, scene: SceneDef) {
        self.scenes.define(name, scene);
    }

    /// Register a transition under `name`, replacing any previous definition.
    pub fn define_transition(&mut self, name: impl Into<String>, transition: TransitionDef) {
        self.transitions.define(name, transition);
    }

    /// Register a popup under `name`, replacing any previous definition.
    pub fn define_popup(&mut self, name: impl Into<String>, popup: PopupDef) {
        self.popups.define(name, popup);
    }

    /// Listen for drawable size changes. The listener receives the per-axis
    /// scale relative to the configured size and the new size in pixels.
    pub fn on_scale<F: FnMut(Vec2, UVec2) + 'static>(&mut self, listener: F) {
        self.scale_listeners.push(Box::new(listener));
    }

    /// Listen for window lifecycle changes.
    pub fn on_status<F: FnMut(WindowStatus) + 'static>(&mut self, listener: F) {
        self.status_listeners.push(Box::new(listener));
    }

    /// Request a change to `scene` using the default transition.
    ///
    /// The request is a latch: if a transition is already running it is
    /// honored once that transition ends. A newer request overwrites an
    /// unconsumed older one.
    pub fn navigate(&mut self, scene: &str) {
        self.scene.pending = Some(scene.to_string());
        self.transition.want_change = true;
        self.transition.active = None;
    }

    /// Request a change to `scene` drawn by a specific transition. An
    /// unknown transition name behaves like [`Director::navigate`].
    pub fn navigate_with(&mut self, scene: &str, transition: &str) {
        self.scene.pending = Some(scene.to_string());
        self.transition.want_change = true;
        self.transition.active =
            Some(transition.to_string()).filter(|name| self.transitions.contains(name));
    }

    /// Request that `popup` be shown. Unknown names are ignored.
    pub fn show(&mut self, popup: &str) {
        if !self.popups.contains(popup) {
            warn!("Popup '{}' was not defined", popup);
            return;
        }
        self.popup.target = Some(popup.to_string());
        self.popup.phase = Some(PopupPhase::Show);
    }

    /// Request that `popup` be hidden. Only the popup currently shown can
    /// be hidden; other names are ignored.
    pub fn hide(&mut self, popup: &str) {
        if self.popup.current.as_deref() == Some(popup) {
            self.popup.phase = Some(PopupPhase::Hide);
        }
    }

    /// Resolve the starting scene and prime all state machines.
    ///
    /// The configured start scene wins; a registered fallback covers a
    /// missing start scene. With neither available there is nothing to show
    /// and the stage refuses to start.
    pub fn start(&mut self, config: &AppConfig) -> Result<(), StageError> {
        let start = if self.scenes.contains(&config.start_scene) {
            config.start_scene.clone()
        } else {
            config
                .fallback_scene
                .clone()
                .filter(|name| self.scenes.contains(name))
                .ok_or_else(|| StageError::NoStartScene(config.start_scene.clone()))?
        };

        self.scene = SceneState {
            current: Some(start),
            target: None,
            pending: None,
        };
        self.transition = TransitionState::new();
        self.popup = PopupState::default();

        self.fallback_scene = config.fallback_scene.clone();
        self.default_transition = config.default_transition.clone();
        self.baseline = UVec2::new(config.width, config.height);
        self.last_size = self.baseline;
        self.scale = Vec2::ONE;
        Ok(())
    }

    /// Announce the window and load the starting scene. Call once, after
    /// the window exists and [`Director::start`] succeeded.
    pub fn open(&mut self) {
        self.emit_status(WindowStatus::Open);
        if let Some(ref name) = self.scene.current {
            if let Some(def) = self.scenes.get_mut(name) {
                def.load();
            }
        }
    }

    /// Announce that the event loop is ending.
    pub fn finish(&mut self) {
        self.emit_status(WindowStatus::Close);
    }

    /// Forward a focus change to status listeners.
    pub fn notify_focus(&mut self, focused: bool) {
        self.emit_status(if focused {
            WindowStatus::Focus
        } else {
            WindowStatus::Blur
        });
    }

    /// Run one frame of stage logic and say what to draw.
    ///
    /// `resized` reports whether the windowing backend delivered a resize
    /// since the last tick; it forces scale dispatch even when the size
    /// polled equal.
    pub fn tick(&mut self, frame: &mut Frame, resized: bool) -> FrameScript {
        if let Some(ref name) = self.scene.current {
            if let Some(def) = self.scenes.get_mut(name) {
                def.update(frame);
            }
        }
        self.apply(frame);

        self.try_start_transition();
        self.advance_transition(frame.dt);
        self.advance_popup(frame);
        self.apply(frame);

        self.dispatch_scale(frame.size, resized);
        frame.scale = self.scale;

        self.script()
    }

    /// Run the draw hooks a [`FrameScript`] names, in order: scene, then
    /// transition overlay, then popup. Requests recorded by draw hooks are
    /// applied at the end and take effect next tick.
    pub fn perform(&mut self, script: &FrameScript, frame: &mut Frame) {
        if let Some(ref name) = script.scene {
            if let Some(def) = self.scenes.get_mut(name) {
                def.draw(frame);
            }
        }

        if let Some(ref cue) = script.overlay {
            match cue.transition {
                Some(ref name) => {
                    if let Some(def) = self.transitions.get_mut(name) {
                        match cue.phase {
                            TransitionPhase::Enter => def.enter(frame, cue.progress),
                            TransitionPhase::Exit => def.exit(frame, cue.progress),
                        }
                    }
                }
                None => draw_wipe(frame, cue.progress),
            }
        }

        if let Some(ref name) = script.popup {
            if let Some(def) = self.popups.get_mut(name) {
                def.draw(frame);
            }
        }

        self.apply(frame);
    }

    /// Scene currently shown.
    pub fn current_scene(&self) -> Option<&str> {
        self.scene.current.as_deref()
    }

    /// Popup currently shown.
    pub fn current_popup(&self) -> Option<&str> {
        self.popup.current.as_deref()
    }

    /// Whether a transition leg is running.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Per-axis scale of the drawable size relative to the configured size.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Apply requests hooks recorded into `frame`.
    pub(crate) fn apply(&mut self, frame: &mut Frame) {
        for action in std::mem::take(&mut frame.actions) {
            match action {
                Action::Navigate { scene, transition } => match transition {
                    Some(transition) => self.navigate_with(&scene, &transition),
                    None => self.navigate(&scene),
                },
                Action::Show(popup) => self.show(&popup),
                Action::Hide(popup) => self.hide(&popup),
            }
        }
    }

    /// Consume a pending navigation request if the stage is idle.
    fn try_start_transition(&mut self) {
        if !self.transition.want_change || self.transition.is_active() {
            return;
        }
        self.transition.want_change = false;

        // Resolve the target scene
        let requested = self.scene.pending.take();
        let mut target = requested
            .clone()
            .filter(|name| self.scenes.contains(name));
        if target.is_none() {
            target = self
                .fallback_scene
                .clone()
                .filter(|name| self.scenes.contains(name));
            if let Some(ref name) = requested {
                match target {
                    Some(ref fallback) => {
                        debug!("Scene '{}' was not defined, using fallback '{}'", name, fallback);
                    }
                    None => warn!("Scene '{}' was not defined and no fallback was stated", name),
                }
            }
        }

        // Choose the transition: the one navigation named, else the default
        let chosen = self
            .transition
            .active
            .take()
            .filter(|name| self.transitions.contains(name))
            .or_else(|| {
                self.default_transition
                    .clone()
                    .filter(|name| self.transitions.contains(name))
            });

        self.transition.duration = chosen
            .as_deref()
            .and_then(|name| self.transitions.get(name))
            .map(|def| def.duration)
            .unwrap_or(DEFAULT_DURATION);
        self.transition.active = chosen;
        self.scene.target = target;

        match self.scene.target {
            Some(ref target) if self.scene.current.as_ref() != Some(target) => {
                debug!("Transition to '{}' started", target);
                self.transition.begin();
            }
            _ => {
                // Same scene or nothing to go to. No visual change.
                self.transition.active = None;
            }
        }
    }

    /// Step the transition clock and swap scenes at the commit point.
    fn advance_transition(&mut self, dt: f32) {
        if let Some(TransitionEvent::Commit) = self.transition.advance(dt) {
            if let Some(ref name) = self.scene.current {
                if let Some(def) = self.scenes.get_mut(name) {
                    def.unload();
                }
            }
            self.scene.current = self.scene.target.clone();
            if let Some(ref name) = self.scene.current {
                debug!("Scene '{}' became current", name);
                if let Some(def) = self.scenes.get_mut(name) {
                    def.load();
                }
            }
        }
    }

    /// Step the popup lifecycle for this tick.
    fn advance_popup(&mut self, frame: &mut Frame) {
        match self.popup.phase {
            Some(PopupPhase::Show) => {
                // Showing the popup already up changes nothing
                if self.popup.target != self.popup.current {
                    if let Some(ref displaced) = self.popup.current {
                        if let Some(def) = self.popups.get_mut(displaced) {
                            def.hide();
                        }
                    }
                    self.popup.current = self.popup.target.clone();
                    if let Some(ref name) = self.popup.current {
                        if let Some(def) = self.popups.get_mut(name) {
                            def.show();
                        }
                    }
                }
                self.popup.phase = Some(PopupPhase::Active);
            }
            Some(PopupPhase::Active) => {
                if let Some(ref name) = self.popup.current {
                    if let Some(def) = self.popups.get_mut(name) {
                        def.update(frame);
                    }
                }
            }
            Some(PopupPhase::Hide) => {
                if let Some(ref name) = self.popup.current {
                    if let Some(def) = self.popups.get_mut(name) {
                        def.hide();
                    }
                }
                self.popup.current = None;
                self.popup.target = None;
                self.popup.phase = None;
            }
            None => {}
        }
    }

    /// Recompute scale and inform listeners when the drawable size changed.
    fn dispatch_scale(&mut self, size: UVec2, resized: bool) {
        if size == self.last_size && !resized {
            return;
        }
        self.last_size = size;

        self.scale = Vec2::new(
            if self.baseline.x > 0 {
                size.x as f32 / self.baseline.x as f32
            } else {
                1.0
            },
            if self.baseline.y > 0 {
                size.y as f32 / self.baseline.y as f32
            } else {
                1.0
            },
        );

        debug!(
            "Drawable resized to {}x{} (scale {} x {})",
            size.x, size.y, self.scale.x, self.scale.y
        );
        for listener in &mut self.scale_listeners {
            listener(self.scale, size);
        }
    }

    fn script(&self) -> FrameScript {
        FrameScript {
            scene: self
                .scene
                .current
                .clone()
                .filter(|name| self.scenes.contains(name)),
            overlay: self.transition.render_phase.map(|phase| OverlayCue {
                transition: self
                    .transition
                    .active
                    .clone()
                    .filter(|name| self.transitions.contains(name)),
                phase,
                progress: self.transition.render_progress,
            }),
            popup: self
                .popup
                .current
                .clone()
                .filter(|name| self.popups.contains(name)),
        }
    }

    fn emit_status(&mut self, status: WindowStatus) {
        for listener in &mut self.status_listeners {
            listener(status);
        }
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new()
    }
}

/// Left-to-right masking wipe used when no named transition is resolved.
fn draw_wipe(frame: &mut Frame, progress: f32) {
    let width = frame.width() * progress;
    let height = frame.height();
    frame.rect(0.0, 0.0, width, height, Color::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use crate::painter::Painter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config(start: &str) -> AppConfig {
        AppConfig::new().size(800, 600).start_scene(start)
    }

    fn frame<'a>(painter: &'a mut Painter, input: &'a Input, dt: f32) -> Frame<'a> {
        sized_frame(painter, input, dt, UVec2::new(800, 600))
    }

    fn sized_frame<'a>(
        painter: &'a mut Painter,
        input: &'a Input,
        dt: f32,
        size: UVec2,
    ) -> Frame<'a> {
        Frame::new(painter, input, 0.0, dt, size, Vec2::ONE)
    }

    #[test]
    fn start_errors_without_scene() {
        let mut director = Director::new();
        let err = director.start(&config("menu")).unwrap_err();
        assert_eq!(err, StageError::NoStartScene("menu".to_string()));
        assert_eq!(
            err.to_string(),
            "Scene 'menu' was not defined and no fallback was stated"
        );
    }

    #[test]
    fn start_uses_fallback() {
        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        director
            .start(&config("missing").fallback_scene("menu"))
            .unwrap();
        assert_eq!(director.current_scene(), Some("menu"));
    }

    #[test]
    fn open_reports_before_load() {
        let log: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        let l = Rc::clone(&log);
        director.define_scene("menu", SceneDef::new().on_load(move || l.borrow_mut().push("load")));
        let l = Rc::clone(&log);
        director.on_status(move |status| {
            if status == WindowStatus::Open {
                l.borrow_mut().push("open");
            }
        });

        director.start(&config("menu")).unwrap();
        director.open();

        assert_eq!(*log.borrow(), vec!["open", "load"]);
    }

    #[test]
    fn handover_covers_then_uncovers() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        let l = Rc::clone(&log);
        director.define_scene(
            "menu",
            SceneDef::new().on_unload(move || l.borrow_mut().push("unload menu".into())),
        );
        let l = Rc::clone(&log);
        director.define_scene(
            "game",
            SceneDef::new().on_load(move || l.borrow_mut().push("load game".into())),
        );
        let enter = Rc::clone(&log);
        let exit = Rc::clone(&log);
        director.define_transition(
            "fade",
            TransitionDef::new()
                .duration(1.0)
                .on_enter(move |_, p| enter.borrow_mut().push(format!("enter {p:.2}")))
                .on_exit(move |_, p| exit.borrow_mut().push(format!("exit {p:.2}"))),
        );
        director.start(&config("menu")).unwrap();
        director.navigate_with("game", "fade");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut cues = Vec::new();
        for _ in 0..9 {
            let mut f = frame(&mut painter, &input, 0.25);
            let script = director.tick(&mut f, false);
            cues.push(script.overlay.clone());
            director.perform(&script, &mut f);
        }

        // Enter counts up to the commit frame, exit counts back down. The
        // final exit frame has already forgotten the transition name, so it
        // falls to the wipe and the exit hook never sees 0.0.
        assert_eq!(
            *log.borrow(),
            vec![
                "enter 0.25",
                "enter 0.50",
                "enter 0.75",
                "unload menu",
                "load game",
                "enter 1.00",
                "exit 0.75",
                "exit 0.50",
                "exit 0.25",
            ]
        );

        assert_eq!(
            cues[3],
            Some(OverlayCue {
                transition: Some("fade".to_string()),
                phase: TransitionPhase::Enter,
                progress: 1.0,
            })
        );
        assert_eq!(
            cues[7],
            Some(OverlayCue {
                transition: None,
                phase: TransitionPhase::Exit,
                progress: 0.0,
            })
        );
        assert_eq!(cues[8], None);
        assert_eq!(director.current_scene(), Some("game"));
        assert!(!director.is_transitioning());
    }

    #[test]
    fn exit_progress_never_rises() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.define_scene("b", SceneDef::new());
        director.define_transition("fade", TransitionDef::new().duration(1.0));
        director.start(&config("a")).unwrap();
        director.navigate_with("b", "fade");

        let mut painter = Painter::new();
        let input = Input::new();

        // Reach the exit leg
        for dt in [0.6, 0.6] {
            let mut f = frame(&mut painter, &input, dt);
            director.tick(&mut f, false);
        }
        assert_eq!(director.current_scene(), Some("b"));

        let mut seen = Vec::new();
        for dt in [0.3, 0.2, 0.45, 0.2] {
            let mut f = frame(&mut painter, &input, dt);
            let script = director.tick(&mut f, false);
            let cue = script.overlay.expect("exit leg still rendering");
            assert_eq!(cue.phase, TransitionPhase::Exit);
            seen.push(cue.progress);
        }

        for pair in seen.windows(2) {
            assert!(pair[1] <= pair[0], "progress rose: {:?}", seen);
        }
        assert!(seen.iter().all(|p| *p >= 0.0));
        assert_eq!(*seen.last().unwrap(), 0.0);
        assert!(!director.is_transitioning());
    }

    #[test]
    fn same_scene_navigation_aborts() {
        let loads = Rc::new(RefCell::new(0));

        let mut director = Director::new();
        let l = Rc::clone(&loads);
        director.define_scene("menu", SceneDef::new().on_load(move || *l.borrow_mut() += 1));
        director.start(&config("menu")).unwrap();
        director.navigate("menu");

        let mut painter = Painter::new();
        let input = Input::new();
        for _ in 0..3 {
            let mut f = frame(&mut painter, &input, 0.25);
            let script = director.tick(&mut f, false);
            assert_eq!(script.overlay, None);
        }

        assert!(!director.is_transitioning());
        assert_eq!(director.current_scene(), Some("menu"));
        assert_eq!(*loads.borrow(), 0);
    }

    #[test]
    fn latest_request_wins() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        let l = Rc::clone(&log);
        director.define_scene("b", SceneDef::new().on_load(move || l.borrow_mut().push("b".into())));
        let l = Rc::clone(&log);
        director.define_scene("c", SceneDef::new().on_load(move || l.borrow_mut().push("c".into())));
        director.start(&config("a")).unwrap();

        director.navigate("b");
        director.navigate("c");

        let mut painter = Painter::new();
        let input = Input::new();
        for _ in 0..2 {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }

        assert_eq!(director.current_scene(), Some("c"));
        assert_eq!(*log.borrow(), vec!["c"]);
    }

    #[test]
    fn midflight_request_waits() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        let l = Rc::clone(&log);
        director.define_scene("a", SceneDef::new().on_unload(move || l.borrow_mut().push("unload a".into())));
        let l = Rc::clone(&log);
        let l2 = Rc::clone(&log);
        director.define_scene(
            "b",
            SceneDef::new()
                .on_load(move || l.borrow_mut().push("load b".into()))
                .on_unload(move || l2.borrow_mut().push("unload b".into())),
        );
        let l = Rc::clone(&log);
        director.define_scene("c", SceneDef::new().on_load(move || l.borrow_mut().push("load c".into())));
        director.define_transition("fade", TransitionDef::new().duration(1.0));
        director.start(&config("a")).unwrap();
        director.navigate_with("b", "fade");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut run = |director: &mut Director, ticks: usize| {
            for _ in 0..ticks {
                let mut f = frame(&mut painter, &input, 0.25);
                director.tick(&mut f, false);
            }
        };

        run(&mut director, 3);
        assert!(director.is_transitioning());
        assert_eq!(director.current_scene(), Some("a"));

        // Lands while the first change is still in flight
        director.navigate("c");

        run(&mut director, 5);
        assert_eq!(director.current_scene(), Some("b"));
        assert!(!director.is_transitioning());

        run(&mut director, 2);
        assert_eq!(director.current_scene(), Some("c"));
        assert_eq!(
            *log.borrow(),
            vec!["unload a", "load b", "unload b", "load c"]
        );
    }

    #[test]
    fn missing_target_uses_fallback() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.define_scene("home", SceneDef::new());
        director
            .start(&config("a").fallback_scene("home"))
            .unwrap();
        director.navigate("missing");

        let mut painter = Painter::new();
        let input = Input::new();
        for _ in 0..2 {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }

        assert_eq!(director.current_scene(), Some("home"));
    }

    #[test]
    fn dropped_request_keeps_scene() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.start(&config("a")).unwrap();
        director.navigate("missing");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(script.overlay, None);
        assert!(!director.is_transitioning());
        assert_eq!(director.current_scene(), Some("a"));
    }

    #[test]
    fn named_transition_sets_duration() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.define_scene("b", SceneDef::new());
        director.define_transition("slide", TransitionDef::new().duration(2.0));
        director.start(&config("a")).unwrap();
        director.navigate_with("b", "slide");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(
            script.overlay,
            Some(OverlayCue {
                transition: Some("slide".to_string()),
                phase: TransitionPhase::Enter,
                progress: 0.125,
            })
        );
    }

    #[test]
    fn unknown_name_uses_default_transition() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.define_scene("b", SceneDef::new());
        director.define_transition("fade", TransitionDef::new().duration(1.0));
        director
            .start(&config("a").default_transition("fade"))
            .unwrap();
        director.navigate_with("b", "ghost");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(
            script.overlay,
            Some(OverlayCue {
                transition: Some("fade".to_string()),
                phase: TransitionPhase::Enter,
                progress: 0.25,
            })
        );
    }

    #[test]
    fn wipe_covers_half_at_half_progress() {
        let mut director = Director::new();
        director.define_scene("a", SceneDef::new());
        director.define_scene("b", SceneDef::new());
        director.start(&config("a")).unwrap();
        director.navigate("b");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        // No transition registered anywhere, so the default duration of 0.5
        // puts the first tick at half progress and the wipe covers half the
        // screen.
        let cue = script.overlay.clone().unwrap();
        assert_eq!(cue.transition, None);
        assert_eq!(cue.progress, 0.5);

        director.perform(&script, &mut f);
        assert_eq!(painter.vertices.len(), 6);
        assert_eq!(painter.vertices[0].position, [0.0, 0.0]);
        assert_eq!(painter.vertices[4].position, [400.0, 600.0]);
    }

    #[test]
    fn update_navigation_starts_same_tick() {
        let mut director = Director::new();
        director.define_scene(
            "menu",
            SceneDef::new().on_update(|frame| frame.navigate("game")),
        );
        director.define_scene("game", SceneDef::new());
        director.start(&config("menu")).unwrap();

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert!(director.is_transitioning());
        assert_eq!(
            script.overlay,
            Some(OverlayCue {
                transition: None,
                phase: TransitionPhase::Enter,
                progress: 0.5,
            })
        );
    }

    #[test]
    fn popup_shows_next_tick_and_draws_last() {
        let log: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        let l = Rc::clone(&log);
        director.define_scene(
            "menu",
            SceneDef::new().on_draw(move |_| l.borrow_mut().push("scene")),
        );
        let shown = Rc::clone(&log);
        let drawn = Rc::clone(&log);
        director.define_popup(
            "pause",
            PopupDef::new()
                .on_show(move || shown.borrow_mut().push("shown"))
                .on_draw(move |_| drawn.borrow_mut().push("popup")),
        );
        director.start(&config("menu")).unwrap();
        director.show("pause");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);
        director.perform(&script, &mut f);

        assert_eq!(script.popup.as_deref(), Some("pause"));
        assert_eq!(director.current_popup(), Some("pause"));
        assert_eq!(*log.borrow(), vec!["shown", "scene", "popup"]);
    }

    #[test]
    fn popup_hides_and_clears() {
        let hides = Rc::new(RefCell::new(0));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let h = Rc::clone(&hides);
        director.define_popup("pause", PopupDef::new().on_hide(move || *h.borrow_mut() += 1));
        director.start(&config("menu")).unwrap();
        director.show("pause");

        let mut painter = Painter::new();
        let input = Input::new();
        {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }
        director.hide("pause");
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(script.popup, None);
        assert_eq!(director.current_popup(), None);
        assert_eq!(*hides.borrow(), 1);
    }

    #[test]
    fn reshow_keeps_popup_quiet() {
        let shows = Rc::new(RefCell::new(0));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let s = Rc::clone(&shows);
        director.define_popup("pause", PopupDef::new().on_show(move || *s.borrow_mut() += 1));
        director.start(&config("menu")).unwrap();

        let mut painter = Painter::new();
        let input = Input::new();
        for _ in 0..2 {
            director.show("pause");
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }

        assert_eq!(director.current_popup(), Some("pause"));
        assert_eq!(*shows.borrow(), 1);
    }

    #[test]
    fn second_popup_displaces_first() {
        let log: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let s = Rc::clone(&log);
        let h = Rc::clone(&log);
        director.define_popup(
            "pause",
            PopupDef::new()
                .on_show(move || s.borrow_mut().push("show pause"))
                .on_hide(move || h.borrow_mut().push("hide pause")),
        );
        let s = Rc::clone(&log);
        director.define_popup(
            "settings",
            PopupDef::new().on_show(move || s.borrow_mut().push("show settings")),
        );
        director.start(&config("menu")).unwrap();

        let mut painter = Painter::new();
        let input = Input::new();
        director.show("pause");
        {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }
        director.show("settings");
        let mut f = frame(&mut painter, &input, 0.25);
        director.tick(&mut f, false);

        assert_eq!(director.current_popup(), Some("settings"));
        assert_eq!(
            *log.borrow(),
            vec!["show pause", "hide pause", "show settings"]
        );
    }

    #[test]
    fn unknown_popup_is_ignored() {
        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        director.start(&config("menu")).unwrap();
        director.show("ghost");

        let mut painter = Painter::new();
        let input = Input::new();
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(script.popup, None);
        assert_eq!(director.current_popup(), None);
    }

    #[test]
    fn hide_of_other_popup_is_ignored() {
        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        director.define_popup("pause", PopupDef::new());
        director.define_popup("settings", PopupDef::new());
        director.start(&config("menu")).unwrap();

        let mut painter = Painter::new();
        let input = Input::new();
        director.show("pause");
        {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }
        director.hide("settings");
        let mut f = frame(&mut painter, &input, 0.25);
        let script = director.tick(&mut f, false);

        assert_eq!(script.popup.as_deref(), Some("pause"));
        assert_eq!(director.current_popup(), Some("pause"));
    }

    #[test]
    fn popup_can_hide_itself() {
        let hides = Rc::new(RefCell::new(0));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let h = Rc::clone(&hides);
        director.define_popup(
            "pause",
            PopupDef::new()
                .on_update(|frame| frame.hide("pause"))
                .on_hide(move || *h.borrow_mut() += 1),
        );
        director.start(&config("menu")).unwrap();
        director.show("pause");

        let mut painter = Painter::new();
        let input = Input::new();
        // Shown, then its update asks to hide, then the hide lands
        for _ in 0..3 {
            let mut f = frame(&mut painter, &input, 0.25);
            director.tick(&mut f, false);
        }

        assert_eq!(director.current_popup(), None);
        assert_eq!(*hides.borrow(), 1);
    }

    #[test]
    fn scale_fires_once_per_change() {
        let calls: Rc<RefCell<Vec<(Vec2, UVec2)>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let c = Rc::clone(&calls);
        director.on_scale(move |scale, size| c.borrow_mut().push((scale, size)));
        director
            .start(&AppConfig::new().size(600, 600).start_scene("menu"))
            .unwrap();

        let mut painter = Painter::new();
        let input = Input::new();

        let mut f = sized_frame(&mut painter, &input, 0.25, UVec2::new(600, 600));
        director.tick(&mut f, false);
        drop(f);

        let mut f = sized_frame(&mut painter, &input, 0.25, UVec2::new(1200, 600));
        director.tick(&mut f, false);
        assert_eq!(f.scale, Vec2::new(2.0, 1.0));
        drop(f);

        let mut f = sized_frame(&mut painter, &input, 0.25, UVec2::new(1200, 600));
        director.tick(&mut f, false);

        assert_eq!(*calls.borrow(), vec![(Vec2::new(2.0, 1.0), UVec2::new(1200, 600))]);
        assert_eq!(director.scale(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn status_listeners_hear_lifecycle() {
        let heard: Rc<RefCell<Vec<WindowStatus>>> = Rc::new(RefCell::new(Vec::new()));

        let mut director = Director::new();
        director.define_scene("menu", SceneDef::new());
        let h = Rc::clone(&heard);
        director.on_status(move |status| h.borrow_mut().push(status));
        director.start(&config("menu")).unwrap();

        director.open();
        director.notify_focus(true);
        director.notify_focus(false);
        director.finish();

        assert_eq!(
            *heard.borrow(),
            vec![
                WindowStatus::Open,
                WindowStatus::Focus,
                WindowStatus::Blur,
                WindowStatus::Close,
            ]
        );
    }
}
