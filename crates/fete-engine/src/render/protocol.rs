/// Wire-format constants shared with the TypeScript renderer.
/// Must stay in sync with `protocol.ts` on the JS side.
///
/// All buffers are flat f32 arrays read directly out of wasm memory via
/// the pointer accessors the web bridge exports.
use crate::render::instance::{ConfettiInstance, PanelState, ShapeInstance, StarInstance};
use crate::types::ViewerEvent;

/// Floats per decorative shape instance (wire format — never changes).
pub const SHAPE_FLOATS: usize = ShapeInstance::FLOATS;

/// Floats per background star point.
pub const STAR_FLOATS: usize = StarInstance::FLOATS;

/// Floats per confetti particle.
pub const CONFETTI_FLOATS: usize = ConfettiInstance::FLOATS;

/// Floats per panel display state.
pub const PANEL_FLOATS: usize = PanelState::FLOATS;

/// Floats per viewer event: kind, a, b, c.
pub const EVENT_FLOATS: usize = ViewerEvent::FLOATS;

/// Maximum live confetti particles. Overlapping celebration windows are
/// capped here rather than allowed to grow without bound.
pub const MAX_CONFETTI: usize = 4096;

/// Maximum viewer events per frame.
pub const MAX_EVENTS: usize = 32;
