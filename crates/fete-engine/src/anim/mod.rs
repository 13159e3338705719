// anim/mod.rs
//
// Animation primitives: pure easing math and the shape tween system.
// Decoupled from the decorative field internals — the field opts in by
// owning a TweenState and ticking it against its shapes.

pub mod easing;
pub mod tween;

pub use easing::{ease, ease_vec3, lerp, Easing};
pub use tween::{Tween, TweenId, TweenState, TweenTarget};
