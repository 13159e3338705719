// overlay.rs
//
// Gallery interaction layer: pointer-driven parallax tilt of the photo
// cards and wheel-to-horizontal-scroll redirection. Active only while the
// gallery step is current; everything that arrives while inactive is
// discarded at this single gate, so handlers can never leak across steps.

use glam::Vec2;

use crate::anim::easing::{ease, Easing};

/// Maximum tilt in degrees on each axis.
const TILT_RANGE: f32 = 10.0;

/// How long the tilt eases toward its target.
const TILT_DURATION: f32 = 0.5;

/// The gallery overlay state.
pub struct GalleryOverlay {
    active: bool,
    /// Gallery container size in CSS pixels, set by the host on layout.
    bounds: Vec2,
    /// Current tilt (rotate_x, rotate_y) in degrees, applied to all cards.
    tilt: Vec2,
    /// Where the tilt is easing from / to.
    ease_from: Vec2,
    target: Vec2,
    ease_t: f32,
    /// Horizontal scroll distance accumulated from redirected wheel input,
    /// drained by the host each frame.
    pending_scroll: f32,
}

impl GalleryOverlay {
    pub fn new() -> Self {
        Self {
            active: false,
            bounds: Vec2::ZERO,
            tilt: Vec2::ZERO,
            ease_from: Vec2::ZERO,
            target: Vec2::ZERO,
            ease_t: 1.0,
            pending_scroll: 0.0,
        }
    }

    /// Toggle the overlay on step entry/exit. Deactivating resets the
    /// tilt immediately: the cards must not stay frozen mid-tilt on a
    /// panel that is no longer interactive.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if !active {
            self.tilt = Vec2::ZERO;
            self.ease_from = Vec2::ZERO;
            self.target = Vec2::ZERO;
            self.ease_t = 1.0;
            self.pending_scroll = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The host reports the gallery container's size whenever layout
    /// changes; pointer coordinates are normalized against it.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Pointer moved over the gallery container, in container-relative
    /// CSS pixels. Maps position linearly into the tilt range.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.active || self.bounds.x <= 0.0 || self.bounds.y <= 0.0 {
            return;
        }
        let rotate_x = map_range(y, 0.0, self.bounds.y, TILT_RANGE, -TILT_RANGE);
        let rotate_y = map_range(x, 0.0, self.bounds.x, -TILT_RANGE, TILT_RANGE);
        self.retarget(Vec2::new(rotate_x, rotate_y));
    }

    /// Pointer left the container: ease back to neutral.
    pub fn pointer_leave(&mut self) {
        if !self.active {
            return;
        }
        self.retarget(Vec2::ZERO);
    }

    /// Wheel input over the gallery. Returns whether the engine consumed
    /// the event — the host must prevent the default vertical scroll
    /// exactly when this is true. Predominantly horizontal gestures pass
    /// through to the native horizontal scroll.
    pub fn wheel(&mut self, dx: f32, dy: f32) -> bool {
        if !self.active {
            return false;
        }
        if dx.abs() > dy.abs() {
            return false;
        }
        self.pending_scroll += dy;
        true
    }

    /// Drain the redirected horizontal scroll distance for the host to
    /// apply to the gallery strip.
    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.pending_scroll)
    }

    /// Current tilt in degrees (rotate_x, rotate_y).
    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }

    /// Advance the tilt ease.
    pub fn tick(&mut self, dt: f32) {
        if self.ease_t >= 1.0 {
            return;
        }
        self.ease_t = (self.ease_t + dt / TILT_DURATION).min(1.0);
        self.tilt = Vec2::new(
            ease(self.ease_from.x, self.target.x, self.ease_t, Easing::QuadOut),
            ease(self.ease_from.y, self.target.y, self.ease_t, Easing::QuadOut),
        );
    }

    fn retarget(&mut self, target: Vec2) {
        self.ease_from = self.tilt;
        self.target = target;
        self.ease_t = 0.0;
    }
}

impl Default for GalleryOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear map of `v` from [in_lo, in_hi] to [out_lo, out_hi].
fn map_range(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let t = ((v - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}
