//! Transition definitions and the two-leg transition clock.

use crate::Frame;

/// Durations below this are treated as instantaneous when normalizing.
pub(crate) const MIN_DURATION: f32 = 1e-4;

/// Duration used when a transition starts without a registered definition.
pub(crate) const DEFAULT_DURATION: f32 = 0.5;

/// A named scene change animation.
///
/// A transition runs in two legs. The enter leg covers the outgoing scene
/// while progress counts up from 0 to 1; the scene swap happens at the top.
/// The exit leg then uncovers the incoming scene while progress counts back
/// down from 1 to 0. The same pair of hooks is used for both legs, so a
/// single shape drawn at `progress` reads as a cover followed by a reveal.
pub struct TransitionDef {
    /// Length of one leg in seconds. The full transition takes twice this.
    pub duration: f32,

    /// Draws the covering leg. Receives normalized progress in `[0, 1]`.
    pub(crate) on_enter: Option<Box<dyn FnMut(&mut Frame, f32)>>,

    /// Draws the uncovering leg. Receives normalized progress in `[0, 1]`.
    pub(crate) on_exit: Option<Box<dyn FnMut(&mut Frame, f32)>>,
}

impl TransitionDef {
    /// Create a transition with the default leg duration and no hooks.
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            on_enter: None,
            on_exit: None,
        }
    }

    /// Set the length of one leg in seconds.
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    /// Set the covering-leg draw callback.
    pub fn on_enter<F: FnMut(&mut Frame, f32) + 'static>(mut self, callback: F) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    /// Set the uncovering-leg draw callback.
    pub fn on_exit<F: FnMut(&mut Frame, f32) + 'static>(mut self, callback: F) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// Call the enter callback if set.
    pub(crate) fn enter(&mut self, frame: &mut Frame, progress: f32) {
        if let Some(ref mut callback) = self.on_enter {
            callback(frame, progress);
        }
    }

    /// Call the exit callback if set.
    pub(crate) fn exit(&mut self, frame: &mut Frame, progress: f32) {
        if let Some(ref mut callback) = self.on_exit {
            callback(frame, progress);
        }
    }
}

impl Default for TransitionDef {
    fn default() -> Self {
        Self::new()
    }
}

/// Which leg of a transition is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Covering the outgoing scene, progress counting up.
    Enter,
    /// Uncovering the incoming scene, progress counting down.
    Exit,
}

/// Something the transition clock did this tick that the director must act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransitionEvent {
    /// The enter leg finished. Swap scenes now.
    Commit,
    /// The exit leg finished. The transition is over.
    Finished,
}

/// The transition clock and its per-frame render snapshot.
///
/// The snapshot (`render_phase`, `render_progress`) is taken before any leg
/// change applies, so the commit frame still draws the enter leg at full
/// progress and the final frame draws the exit leg at zero.
pub(crate) struct TransitionState {
    /// Running leg, or `None` when idle.
    pub phase: Option<TransitionPhase>,

    /// Set by navigation. Consumed when the next transition start is tried.
    pub want_change: bool,

    /// Name of the transition chosen for the current or upcoming change.
    pub active: Option<String>,

    /// Seconds into the current leg. Counts up on enter, down on exit.
    pub clock: f32,

    /// Length of one leg in seconds.
    pub duration: f32,

    /// Leg to draw this frame, captured before leg changes apply.
    pub render_phase: Option<TransitionPhase>,

    /// Progress to draw this frame, in `[0, 1]`.
    pub render_progress: f32,
}

impl TransitionState {
    pub fn new() -> Self {
        Self {
            phase: None,
            want_change: false,
            active: None,
            clock: 0.0,
            duration: DEFAULT_DURATION,
            render_phase: None,
            render_progress: 0.0,
        }
    }

    /// Normalized clock position, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.clock / self.duration.max(MIN_DURATION)).clamp(0.0, 1.0)
    }

    /// Whether a leg is currently running.
    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    /// Start the enter leg from zero.
    pub fn begin(&mut self) {
        self.phase = Some(TransitionPhase::Enter);
        self.clock = 0.0;
    }

    /// Step the clock by `dt` seconds and refresh the render snapshot.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionEvent> {
        match self.phase {
            Some(TransitionPhase::Enter) => {
                self.clock += dt;
                let progress = self.progress();
                self.render_phase = Some(TransitionPhase::Enter);
                self.render_progress = progress;
                if progress >= 1.0 {
                    self.phase = Some(TransitionPhase::Exit);
                    self.clock = self.duration;
                    return Some(TransitionEvent::Commit);
                }
            }
            Some(TransitionPhase::Exit) => {
                self.clock -= dt;
                self.render_phase = Some(TransitionPhase::Exit);
                self.render_progress = self.progress();
                if self.clock <= 0.0 {
                    self.phase = None;
                    self.active = None;
                    self.clock = 0.0;
                    return Some(TransitionEvent::Finished);
                }
            }
            None => {
                self.render_phase = None;
                self.render_progress = 0.0;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clock_keeps_snapshot_blank() {
        let mut state = TransitionState::new();
        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.render_phase, None);
        assert_eq!(state.render_progress, 0.0);
    }

    #[test]
    fn enter_counts_up_then_commits() {
        let mut state = TransitionState::new();
        state.duration = 1.0;
        state.begin();

        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.render_phase, Some(TransitionPhase::Enter));
        assert_eq!(state.render_progress, 0.25);

        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.render_progress, 0.75);

        assert_eq!(state.advance(0.25), Some(TransitionEvent::Commit));
        assert_eq!(state.render_phase, Some(TransitionPhase::Enter));
        assert_eq!(state.render_progress, 1.0);
        assert_eq!(state.phase, Some(TransitionPhase::Exit));
        assert_eq!(state.clock, 1.0);
    }

    #[test]
    fn exit_counts_down_then_finishes() {
        let mut state = TransitionState::new();
        state.duration = 1.0;
        state.active = Some("fade".into());
        state.phase = Some(TransitionPhase::Exit);
        state.clock = 1.0;

        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.render_phase, Some(TransitionPhase::Exit));
        assert_eq!(state.render_progress, 0.75);

        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.advance(0.25), None);
        assert_eq!(state.advance(0.25), Some(TransitionEvent::Finished));

        assert_eq!(state.render_phase, Some(TransitionPhase::Exit));
        assert_eq!(state.render_progress, 0.0);
        assert_eq!(state.phase, None);
        assert_eq!(state.active, None);
        assert_eq!(state.clock, 0.0);
    }

    #[test]
    fn progress_never_leaves_unit_range() {
        let mut state = TransitionState::new();
        state.duration = 1.0;
        state.phase = Some(TransitionPhase::Exit);
        state.clock = 0.3;

        state.advance(10.0);
        assert_eq!(state.render_progress, 0.0);

        state.begin();
        state.clock = 0.9;
        state.advance(10.0);
        assert_eq!(state.render_progress, 1.0);
    }

    #[test]
    fn zero_duration_commits_on_first_step() {
        let mut state = TransitionState::new();
        state.duration = 0.0;
        state.begin();

        assert_eq!(state.advance(0.016), Some(TransitionEvent::Commit));
        assert_eq!(state.render_progress, 1.0);

        assert_eq!(state.advance(0.016), Some(TransitionEvent::Finished));
        assert_eq!(state.render_progress, 0.0);
    }
}
