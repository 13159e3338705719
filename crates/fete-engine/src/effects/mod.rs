//! Celebration effects: the timed confetti bursts fired from the viewport
//! edges. Visually independent of the decorative shape field — confetti
//! has no state beyond its own particles and burst timers.

mod confetti;
mod palette;

pub use confetti::Confetti;
pub use palette::ConfettiColor;

use glam::Vec2;

use crate::core::rng::Rng;
use crate::render::instance::ConfettiInstance;
use crate::render::protocol::MAX_CONFETTI;

/// How long one celebration window keeps emitting.
const BURST_DURATION: f32 = 5.0;

/// Particles per second from each viewport edge while a window is active.
/// Matches two particles per side per frame at 60 fps.
const EMIT_RATE: f32 = 120.0;

/// Launch angles from the horizontal, in degrees: up-and-inward from the
/// left edge, mirrored on the right.
const LEFT_ANGLE_DEG: f32 = 60.0;
const RIGHT_ANGLE_DEG: f32 = 120.0;

/// Angular spread around the launch angle, in degrees.
const SPREAD_DEG: f32 = 55.0;

/// Container for all confetti state. Overlapping `celebrate()` calls each
/// get their own burst window and run to completion independently.
pub struct ConfettiState {
    bursts: Vec<f32>,
    particles: Vec<Confetti>,
    rng: Rng,
    viewport: Vec2,
    emit_accum: f32,
}

impl ConfettiState {
    /// Create a new ConfettiState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            bursts: Vec::new(),
            particles: Vec::new(),
            rng: Rng::new(seed.wrapping_add(104729)),
            viewport: Vec2::new(1280.0, 720.0),
            emit_accum: 0.0,
        }
    }

    /// Viewport size in CSS pixels; emission origins track the edges.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Open a new burst window.
    pub fn celebrate(&mut self) {
        self.bursts.push(BURST_DURATION);
    }

    /// Number of celebration windows currently emitting.
    pub fn active_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Advance burst timers, emit from both edges for every active
    /// window, and tick particles.
    pub fn tick(&mut self, dt: f32) {
        if !self.bursts.is_empty() {
            self.emit_accum += dt * EMIT_RATE;
            let per_side = self.emit_accum as usize;
            self.emit_accum -= per_side as f32;
            for _ in 0..per_side * self.bursts.len() {
                self.spawn_edge(true);
                self.spawn_edge(false);
            }
        } else {
            self.emit_accum = 0.0;
        }

        for burst in &mut self.bursts {
            *burst -= dt;
        }
        self.bursts.retain(|remaining| *remaining > 0.0);

        self.particles.retain_mut(|p| p.tick(dt));
    }

    fn spawn_edge(&mut self, left: bool) {
        if self.particles.len() >= MAX_CONFETTI {
            return;
        }
        let base_deg = if left { LEFT_ANGLE_DEG } else { RIGHT_ANGLE_DEG };
        let angle = (base_deg + self.rng.range(-SPREAD_DEG / 2.0, SPREAD_DEG / 2.0)).to_radians();
        let speed = self.rng.range(500.0, 900.0);
        // Screen coordinates are y-down, launch angles are measured upward
        let vel = Vec2::new(angle.cos() * speed, -angle.sin() * speed);
        let pos = Vec2::new(
            if left { 0.0 } else { self.viewport.x },
            self.viewport.y * 0.5,
        );
        self.particles.push(Confetti::new(
            pos,
            vel,
            self.rng.range(6.0, 12.0),
            ConfettiColor::random(&mut self.rng),
            self.rng.range(-10.0, 10.0),
            self.rng.range(2.0, 3.5),
        ));
    }

    /// Rebuild the instance buffer for the JS renderer.
    pub fn build_instances(&self, out: &mut Vec<ConfettiInstance>) {
        out.clear();
        for p in &self.particles {
            let [r, g, b] = p.color.rgb();
            out.push(ConfettiInstance {
                x: p.pos.x,
                y: p.pos.y,
                rotation: p.rotation,
                size: p.size,
                r,
                g,
                b,
                alpha: p.alpha(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celebrate_emits_from_both_edges() {
        let mut state = ConfettiState::new(42);
        state.set_viewport(1000.0, 500.0);
        state.celebrate();
        state.tick(1.0 / 60.0);
        assert!(state.particle_count() >= 4);
        let mut out = Vec::new();
        state.build_instances(&mut out);
        assert!(out.iter().any(|p| p.x <= 100.0));
        assert!(out.iter().any(|p| p.x >= 900.0));
    }

    #[test]
    fn burst_window_expires() {
        let mut state = ConfettiState::new(42);
        state.celebrate();
        for _ in 0..400 {
            state.tick(1.0 / 60.0); // ~6.7 s total
        }
        assert_eq!(state.active_bursts(), 0);
        // Particles outlive the window briefly, then die off
        for _ in 0..300 {
            state.tick(1.0 / 60.0);
        }
        assert_eq!(state.particle_count(), 0);
    }

    #[test]
    fn overlapping_celebrations_run_independently() {
        let mut state = ConfettiState::new(42);
        state.celebrate();
        state.celebrate();
        assert_eq!(state.active_bursts(), 2);

        // Emission doubles while both windows are open
        state.tick(1.0 / 60.0);
        assert!(state.particle_count() >= 8);

        // Stagger: open another window halfway through
        for _ in 0..150 {
            state.tick(1.0 / 60.0);
        }
        state.celebrate();
        assert_eq!(state.active_bursts(), 3);
        for _ in 0..180 {
            state.tick(1.0 / 60.0);
        }
        // First two expired, the late one still runs
        assert_eq!(state.active_bursts(), 1);
    }

    #[test]
    fn particle_population_is_capped() {
        let mut state = ConfettiState::new(42);
        for _ in 0..50 {
            state.celebrate();
        }
        for _ in 0..600 {
            state.tick(1.0 / 60.0);
            assert!(state.particle_count() <= MAX_CONFETTI);
        }
    }

    #[test]
    fn idle_state_emits_nothing() {
        let mut state = ConfettiState::new(42);
        state.tick(1.0);
        assert_eq!(state.particle_count(), 0);
        assert_eq!(state.active_bursts(), 0);
    }
}
