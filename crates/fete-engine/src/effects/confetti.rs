use glam::Vec2;

use super::palette::ConfettiColor;

/// Downward acceleration in px/s².
const GRAVITY: f32 = 600.0;

/// Velocity damping per second.
const DRAG: f32 = 0.8;

/// A single confetti particle with physics and rendering state.
/// Positions are viewport pixels, y-down.
#[derive(Debug, Clone)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: ConfettiColor,
    pub rotation: f32,
    /// Spin rate in rad/s.
    pub spin: f32,
    /// Seconds of life remaining.
    pub lifetime: f32,
    max_lifetime: f32,
}

impl Confetti {
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        size: f32,
        color: ConfettiColor,
        spin: f32,
        lifetime: f32,
    ) -> Self {
        Self {
            pos,
            vel,
            size,
            color,
            rotation: 0.0,
            spin,
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// Advance particle physics. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }

        self.vel.y += GRAVITY * dt;
        self.vel *= 1.0 - (DRAG * dt).min(1.0);
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;

        true
    }

    /// Fade out over the last part of the particle's life.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / (self.max_lifetime * 0.5)).clamp(0.0, 1.0)
    }
}
