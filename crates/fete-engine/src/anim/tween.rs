// anim/tween.rs
//
// Tween system — manages animated value transitions by ShapeId.
//
// Cancellation model: starting a conflicting effect first calls
// `kill_shape`, which drops every in-flight tween for that shape outright.
// Last writer wins; stale tweens never blend into a new target.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(id, Tween::position(from, to, 5.0, Easing::CubicIn));
//   tweens.tick(dt, &mut shapes);

use std::collections::HashMap;

use glam::Vec3;

use super::easing::{ease, ease_vec3, Easing};
use crate::decor::shape::ShapeSet;
use crate::types::ShapeId;

/// What property a tween animates.
#[derive(Debug, Clone, Copy)]
pub enum TweenTarget {
    /// Animate Shape.pos
    Position { from: Vec3, to: Vec3 },
    /// Animate Shape.opacity
    Opacity { from: f32, to: f32 },
}

/// A single one-shot tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    /// What to animate.
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    /// Easing function.
    pub easing: Easing,
}

impl Tween {
    /// Create a position tween.
    pub fn position(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            target: TweenTarget::Position { from, to },
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Create an opacity (fade) tween.
    pub fn opacity(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            target: TweenTarget::Opacity { from, to },
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether the tween has run its full duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (ShapeId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for a shape. Returns a handle for later control.
    pub fn add(&mut self, shape: ShapeId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (shape, tween));
        id
    }

    /// Remove a tween by handle.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Kill all in-flight tweens for a shape. The cancel half of
    /// cancel-then-replace: call before starting a conflicting animation.
    pub fn kill_shape(&mut self, shape: ShapeId) {
        self.tweens.retain(|_, (s, _)| *s != shape);
    }

    /// Get a tween by handle.
    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id).map(|(_, t)| t)
    }

    /// Advance all tweens and apply to shapes.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, shapes: &mut ShapeSet) -> usize {
        let mut completed = Vec::new();

        for (&id, (shape_id, tween)) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            let t = tween.progress();
            let done = tween.is_complete();

            if let Some(shape) = shapes.get_mut(*shape_id) {
                // Land exactly on the target at completion; interpolation
                // may be a ulp off and rest positions must restore exactly.
                match tween.target {
                    TweenTarget::Position { from, to } => {
                        shape.pos = if done { to } else { ease_vec3(from, to, t, tween.easing) };
                    }
                    TweenTarget::Opacity { from, to } => {
                        shape.opacity = if done { to } else { ease(from, to, t, tween.easing) };
                    }
                }
            }

            if done {
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }

        count
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Clear all tweens.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
