use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::anim::{Easing, Tween, TweenState};
use crate::core::rng::Rng;
use crate::decor::shape::{Shape, ShapeSet, ShapeVariant};
use crate::render::instance::ShapeInstance;
use crate::types::ShapeId;

/// Number of foreground decorative shapes.
pub const SHAPE_COUNT: usize = 25;

/// Half-extents of the shape field bounding volume.
const FIELD_HALF_X: f32 = 10.0;
const FIELD_HALF_Y: f32 = 10.0;
const FIELD_HALF_Z: f32 = 5.0;

/// Uniform scale range at creation.
const SCALE_MIN: f32 = 0.3;
const SCALE_MAX: f32 = 0.8;

/// Bobbing speed range at creation.
const SPEED_MIN: f32 = 0.1;
const SPEED_MAX: f32 = 0.4;

/// Scene time scale fed into the bobbing sinusoid.
const TIME_SCALE: f32 = 0.5;

/// Disperse: how far shapes drift on x/y, where they end on z, how long.
const DISPERSE_DRIFT: f32 = 15.0;
const DISPERSE_DEPTH: f32 = 10.0;
const DISPERSE_DURATION: f32 = 5.0;

/// Recall: return-to-rest duration.
const RECALL_DURATION: f32 = 1.0;

/// The ambient decorative shape field. Population is created once and its
/// count never changes; celebration effects only reposition and fade it.
pub struct DecorField {
    shapes: ShapeSet,
    tweens: TweenState,
    rng: Rng,
}

impl DecorField {
    /// Build the full population from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed.wrapping_add(7919));
        let mut shapes = ShapeSet::with_capacity(SHAPE_COUNT);

        for i in 0..SHAPE_COUNT {
            let variant = match rng.next_int(3) {
                0 => ShapeVariant::Heart,
                1 => ShapeVariant::Gift,
                _ => ShapeVariant::Star,
            };
            let pos = Vec3::new(
                rng.range(-FIELD_HALF_X, FIELD_HALF_X),
                rng.range(-FIELD_HALF_Y, FIELD_HALF_Y),
                rng.range(-FIELD_HALF_Z, FIELD_HALF_Z),
            );
            let rotation = Vec3::new(
                rng.range(0.0, PI),
                rng.range(0.0, PI),
                rng.range(0.0, PI),
            );
            let shape = Shape::new(ShapeId(i as u32 + 1), variant, pos)
                .with_rotation(rotation)
                .with_scale(rng.range(SCALE_MIN, SCALE_MAX))
                .with_motion(rng.range(0.0, TAU), rng.range(SPEED_MIN, SPEED_MAX));
            shapes.spawn(shape);
        }

        Self {
            shapes,
            tweens: TweenState::new(),
            rng,
        }
    }

    /// Advance the scene one frame: bobbing from elapsed wall-clock time,
    /// then any in-flight position/opacity tweens.
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        let time = elapsed * TIME_SCALE;
        for shape in self.shapes.iter_mut() {
            shape.bob(time);
        }
        self.tweens.tick(dt, &mut self.shapes);
    }

    /// Scatter every shape off-screen and fade it out. Kills any in-flight
    /// recall first and restarts from the rest state, so repeated
    /// celebrations always play the same motion.
    pub fn disperse(&mut self) {
        let ids: Vec<ShapeId> = self.shapes.iter().map(|s| s.id).collect();
        for id in ids {
            self.tweens.kill_shape(id);
            let drift = Vec3::new(
                DISPERSE_DRIFT * self.rng.sign(),
                DISPERSE_DRIFT * self.rng.sign(),
                0.0,
            );
            let rest = match self.shapes.get_mut(id) {
                Some(shape) => {
                    shape.pos = shape.rest_pos;
                    shape.opacity = 1.0;
                    shape.rest_pos
                }
                None => continue,
            };
            let target = Vec3::new(rest.x + drift.x, rest.y + drift.y, DISPERSE_DEPTH);
            self.tweens.add(
                id,
                Tween::position(rest, target, DISPERSE_DURATION, Easing::CubicIn),
            );
            self.tweens.add(
                id,
                Tween::opacity(1.0, 0.0, DISPERSE_DURATION, Easing::CubicIn),
            );
        }
    }

    /// Bring every shape back to its rest position at full opacity,
    /// killing any in-flight disperse outright.
    pub fn recall(&mut self) {
        let ids: Vec<ShapeId> = self.shapes.iter().map(|s| s.id).collect();
        for id in ids {
            self.tweens.kill_shape(id);
            let (pos, opacity, rest) = match self.shapes.get(id) {
                Some(shape) => (shape.pos, shape.opacity, shape.rest_pos),
                None => continue,
            };
            self.tweens.add(
                id,
                Tween::position(pos, rest, RECALL_DURATION, Easing::CubicOut),
            );
            self.tweens.add(
                id,
                Tween::opacity(opacity, 1.0, RECALL_DURATION, Easing::QuadOut),
            );
        }
    }

    /// Number of shapes (invariant for the view's lifetime).
    pub fn count(&self) -> usize {
        self.shapes.len()
    }

    /// Whether any disperse/recall tween is still running.
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Rebuild the instance buffer for the JS renderer.
    pub fn build_instances(&self, out: &mut Vec<ShapeInstance>) {
        out.clear();
        for shape in self.shapes.iter() {
            out.push(ShapeInstance {
                x: shape.pos.x,
                y: shape.pos.y,
                z: shape.pos.z,
                rot_x: shape.rotation.x,
                rot_y: shape.rotation.y,
                rot_z: shape.rotation.z,
                scale: shape.scale,
                opacity: shape.opacity,
                variant: shape.variant.code(),
                _pad: 0.0,
            });
        }
    }
}
