// steps/sequencer.rs
//
// The step transition machine. Exit must fully complete before the next
// panel is revealed — the two panels are never simultaneously interactive.
// A navigation issued mid-transition kills the in-flight phase and starts
// a fresh one from whichever panel is visible (last writer wins).

use crate::anim::easing::{ease, Easing};
use crate::render::instance::PanelState;
use crate::steps::step::Step;

/// Exit animation: fade out + scale down.
const EXIT_DURATION: f32 = 0.4;
const EXIT_SCALE: f32 = 0.9;

/// Entry animation: fade in + settle from slightly enlarged.
const ENTER_DURATION: f32 = 0.6;
const ENTER_SCALE: f32 = 1.1;

/// One-time entrance of the first panel on initial mount.
const ENTRANCE_DELAY: f32 = 0.5;
const ENTRANCE_DURATION: f32 = 1.0;

/// Display state of one step's panel.
#[derive(Debug, Clone)]
pub struct Panel {
    pub step: Step,
    pub visible: bool,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy)]
enum Transition {
    Idle,
    /// One-time delayed entrance of the first panel.
    Entrance { t: f32 },
    /// Current panel fading out; target still hidden.
    Exiting {
        from: Step,
        to: Step,
        t: f32,
        from_opacity: f32,
        from_scale: f32,
    },
    /// Target panel fading in; the old panel is already hidden.
    Entering {
        to: Step,
        t: f32,
        from_opacity: f32,
        from_scale: f32,
    },
}

/// Owns the current step, the per-panel display state, and the
/// transition machine between them.
pub struct StepSequencer {
    panels: Vec<Panel>,
    current: Step,
    transition: Transition,
}

impl StepSequencer {
    /// Sequencer over the full step sequence.
    pub fn new() -> Self {
        Self::with_steps(&Step::ALL)
    }

    /// Sequencer over a subset of steps. The first listed step starts
    /// visible with its one-time entrance pending.
    pub fn with_steps(steps: &[Step]) -> Self {
        let panels: Vec<Panel> = steps
            .iter()
            .map(|&step| Panel {
                step,
                visible: false,
                opacity: 0.0,
                scale: 1.0,
            })
            .collect();

        let current = steps.first().copied().unwrap_or(Step::Welcome);
        let mut seq = Self {
            panels,
            current,
            transition: Transition::Entrance { t: 0.0 },
        };
        if let Some(panel) = seq.panel_mut(current) {
            panel.visible = true;
            panel.opacity = 0.0;
            panel.scale = ENTER_SCALE;
        }
        seq
    }

    /// The committed step.
    pub fn current(&self) -> Step {
        self.current
    }

    /// Progress indicator fraction for the committed step.
    pub fn progress(&self) -> f32 {
        self.current.progress()
    }

    /// The step whose panel is on screen right now (mid-transition this
    /// can differ from the committed step).
    pub fn visible_step(&self) -> Step {
        match self.transition {
            Transition::Idle | Transition::Entrance { .. } => self.current,
            Transition::Exiting { from, .. } => from,
            Transition::Entering { to, .. } => to,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self.transition, Transition::Idle)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    fn panel(&self, step: Step) -> Option<&Panel> {
        self.panels.iter().find(|p| p.step == step)
    }

    fn panel_mut(&mut self, step: Step) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.step == step)
    }

    /// Navigate to a step. Same-step calls and steps without a panel
    /// (a configuration mismatch) are no-ops. Mid-transition calls kill
    /// the in-flight phase and restart from the visible panel.
    pub fn go_to_step(&mut self, target: Step) {
        if self.panel(target).is_none() {
            return;
        }

        match self.transition {
            Transition::Idle => {
                if target == self.current {
                    return;
                }
                self.start_exit(self.current, target);
            }
            Transition::Entrance { .. } => {
                if target == self.current {
                    return;
                }
                self.start_exit(self.current, target);
            }
            Transition::Exiting { from, to, .. } => {
                if target == to {
                    return;
                }
                if target == from {
                    // Turn around: bring the still-visible panel back
                    self.start_enter_from_current(from);
                } else {
                    self.start_exit(from, target);
                }
            }
            Transition::Entering { to, .. } => {
                if target == to {
                    return;
                }
                self.start_exit(to, target);
            }
        }
    }

    fn start_exit(&mut self, from: Step, to: Step) {
        let (from_opacity, from_scale) = match self.panel(from) {
            Some(p) => (p.opacity, p.scale),
            None => (1.0, 1.0),
        };
        self.transition = Transition::Exiting {
            from,
            to,
            t: 0.0,
            from_opacity,
            from_scale,
        };
    }

    fn start_enter_from_current(&mut self, to: Step) {
        let (from_opacity, from_scale) = match self.panel(to) {
            Some(p) => (p.opacity, p.scale),
            None => (0.0, ENTER_SCALE),
        };
        self.transition = Transition::Entering {
            to,
            t: 0.0,
            from_opacity,
            from_scale,
        };
    }

    /// Advance the transition machine. Returns the step committed this
    /// tick, if the exit/reveal swap happened.
    pub fn tick(&mut self, dt: f32) -> Option<Step> {
        match self.transition {
            Transition::Idle => None,

            Transition::Entrance { t } => {
                let t = t + dt;
                if t < ENTRANCE_DELAY {
                    self.transition = Transition::Entrance { t };
                    return None;
                }
                let p = (t - ENTRANCE_DELAY) / ENTRANCE_DURATION;
                let current = self.current;
                if let Some(panel) = self.panel_mut(current) {
                    if p >= 1.0 {
                        panel.opacity = 1.0;
                        panel.scale = 1.0;
                    } else {
                        panel.opacity = ease(0.0, 1.0, p, Easing::QuartOut);
                        panel.scale = ease(ENTER_SCALE, 1.0, p, Easing::QuartOut);
                    }
                }
                self.transition = if p >= 1.0 {
                    Transition::Idle
                } else {
                    Transition::Entrance { t }
                };
                None
            }

            Transition::Exiting {
                from,
                to,
                t,
                from_opacity,
                from_scale,
            } => {
                let t = t + dt;
                let p = t / EXIT_DURATION;
                if p >= 1.0 {
                    // Swap: hide the old panel, reveal the target, commit
                    if let Some(panel) = self.panel_mut(from) {
                        panel.visible = false;
                        panel.opacity = 0.0;
                        panel.scale = 1.0;
                    }
                    if let Some(panel) = self.panel_mut(to) {
                        panel.visible = true;
                        panel.opacity = 0.0;
                        panel.scale = ENTER_SCALE;
                    }
                    self.current = to;
                    self.transition = Transition::Entering {
                        to,
                        t: 0.0,
                        from_opacity: 0.0,
                        from_scale: ENTER_SCALE,
                    };
                    Some(to)
                } else {
                    if let Some(panel) = self.panel_mut(from) {
                        panel.opacity = ease(from_opacity, 0.0, p, Easing::QuartIn);
                        panel.scale = ease(from_scale, EXIT_SCALE, p, Easing::QuartIn);
                    }
                    self.transition = Transition::Exiting {
                        from,
                        to,
                        t,
                        from_opacity,
                        from_scale,
                    };
                    None
                }
            }

            Transition::Entering {
                to,
                t,
                from_opacity,
                from_scale,
            } => {
                let t = t + dt;
                let p = t / ENTER_DURATION;
                if let Some(panel) = self.panel_mut(to) {
                    if p >= 1.0 {
                        panel.opacity = 1.0;
                        panel.scale = 1.0;
                    } else {
                        panel.opacity = ease(from_opacity, 1.0, p, Easing::QuartOut);
                        panel.scale = ease(from_scale, 1.0, p, Easing::QuartOut);
                    }
                }
                self.transition = if p >= 1.0 {
                    Transition::Idle
                } else {
                    Transition::Entering {
                        to,
                        t,
                        from_opacity,
                        from_scale,
                    }
                };
                None
            }
        }
    }

    /// Rebuild the per-panel display buffer for the DOM layer.
    pub fn build_panel_states(&self, out: &mut Vec<PanelState>) {
        out.clear();
        for panel in &self.panels {
            out.push(PanelState {
                visible: if panel.visible { 1.0 } else { 0.0 },
                opacity: panel.opacity,
                scale: panel.scale,
                _pad: 0.0,
            });
        }
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(seq: &mut StepSequencer) {
        for _ in 0..300 {
            seq.tick(0.016);
        }
    }

    fn visible_count(seq: &StepSequencer) -> usize {
        seq.panels().iter().filter(|p| p.visible).count()
    }

    #[test]
    fn entrance_reveals_first_panel() {
        let mut seq = StepSequencer::new();
        assert_eq!(seq.current(), Step::Welcome);
        // During the delay nothing moves
        seq.tick(0.2);
        let welcome = seq.panels().iter().find(|p| p.step == Step::Welcome).unwrap();
        assert_eq!(welcome.opacity, 0.0);
        settle(&mut seq);
        let welcome = seq.panels().iter().find(|p| p.step == Step::Welcome).unwrap();
        assert!(welcome.visible);
        assert_eq!(welcome.opacity, 1.0);
        assert_eq!(welcome.scale, 1.0);
        assert!(!seq.is_transitioning());
    }

    #[test]
    fn go_to_same_step_is_a_no_op() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        let before: Vec<(bool, f32, f32)> = seq
            .panels()
            .iter()
            .map(|p| (p.visible, p.opacity, p.scale))
            .collect();
        seq.go_to_step(Step::Welcome);
        assert!(!seq.is_transitioning());
        seq.tick(0.016);
        let after: Vec<(bool, f32, f32)> = seq
            .panels()
            .iter()
            .map(|p| (p.visible, p.opacity, p.scale))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn transition_commits_after_exit_completes() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        seq.go_to_step(Step::Greeting);
        assert_eq!(seq.current(), Step::Welcome, "commit waits for the swap");

        let mut committed = None;
        for _ in 0..300 {
            if let Some(step) = seq.tick(0.016) {
                committed = Some(step);
                break;
            }
        }
        assert_eq!(committed, Some(Step::Greeting));
        assert_eq!(seq.current(), Step::Greeting);
        settle(&mut seq);
        let greeting = seq.panels().iter().find(|p| p.step == Step::Greeting).unwrap();
        assert!(greeting.visible);
        assert_eq!(greeting.opacity, 1.0);
        assert_eq!(visible_count(&seq), 1);
    }

    #[test]
    fn panels_never_simultaneously_visible() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        seq.go_to_step(Step::Wish);
        for _ in 0..300 {
            seq.tick(0.016);
            assert!(visible_count(&seq) <= 1);
        }
        assert_eq!(seq.current(), Step::Wish);
    }

    #[test]
    fn every_step_is_directly_addressable() {
        for &target in &Step::ALL[1..] {
            let mut seq = StepSequencer::new();
            settle(&mut seq);
            seq.go_to_step(target);
            settle(&mut seq);
            assert_eq!(seq.current(), target);
            assert_eq!(visible_count(&seq), 1);
            let panel = seq.panels().iter().find(|p| p.step == target).unwrap();
            assert!(panel.visible);
            assert_eq!(panel.opacity, 1.0);
        }
    }

    #[test]
    fn missing_panel_is_a_no_op() {
        let mut seq = StepSequencer::with_steps(&[Step::Welcome, Step::Greeting]);
        settle(&mut seq);
        seq.go_to_step(Step::Wish);
        assert!(!seq.is_transitioning());
        assert_eq!(seq.current(), Step::Welcome);
    }

    #[test]
    fn retarget_mid_exit_lands_on_latest_target() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        seq.go_to_step(Step::Greeting);
        seq.tick(0.1); // partway through the exit
        seq.go_to_step(Step::Letter);
        settle(&mut seq);
        assert_eq!(seq.current(), Step::Letter);
        assert_eq!(visible_count(&seq), 1);
    }

    #[test]
    fn turn_around_mid_exit_restores_origin() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        seq.go_to_step(Step::Greeting);
        seq.tick(0.1);
        seq.go_to_step(Step::Welcome);
        settle(&mut seq);
        assert_eq!(seq.current(), Step::Welcome);
        let welcome = seq.panels().iter().find(|p| p.step == Step::Welcome).unwrap();
        assert!(welcome.visible);
        assert_eq!(welcome.opacity, 1.0);
    }

    #[test]
    fn progress_tracks_committed_step() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        assert_eq!(seq.progress(), 0.0);
        seq.go_to_step(Step::Wish);
        settle(&mut seq);
        assert_eq!(seq.progress(), 1.0);
    }

    #[test]
    fn panel_states_buffer_matches_panels() {
        let mut seq = StepSequencer::new();
        settle(&mut seq);
        let mut out = Vec::new();
        seq.build_panel_states(&mut out);
        assert_eq!(out.len(), Step::COUNT);
        assert_eq!(out[0].visible, 1.0);
        assert_eq!(out[1].visible, 0.0);
    }
}
