use bytemuck::{Pod, Zeroable};

/// Unique identifier for a decorative shape in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

/// An event communicated from the engine to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ViewerEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl ViewerEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

// ── Event kinds to the host ──────────────────────────────────────────

/// The committed step changed (a = 1-based step index).
pub const EVENT_STEP_CHANGED: f32 = 1.0;
/// Create the embed player loaded with playlist track `a`.
pub const EVENT_PLAYER_CREATE: f32 = 2.0;
/// Cue playlist track `a` into the existing player.
pub const EVENT_PLAYER_CUE: f32 = 3.0;
/// Start playback.
pub const EVENT_PLAYER_PLAY: f32 = 4.0;
/// Pause playback.
pub const EVENT_PLAYER_PAUSE: f32 = 5.0;
/// Set player volume to `a` percent.
pub const EVENT_PLAYER_VOLUME: f32 = 6.0;
/// Write the wish export text to the clipboard (text fetched separately).
pub const EVENT_CLIPBOARD_WRITE: f32 = 7.0;
/// The viewer asked to leave for the setup form. No payload.
pub const EVENT_START_OVER: f32 = 8.0;

// ── UI action kinds from the host ────────────────────────────────────

pub const ACTION_BEGIN: u32 = 1;
/// value = 1-based step index.
pub const ACTION_GO_TO_STEP: u32 = 2;
pub const ACTION_GO_HOME: u32 = 3;
pub const ACTION_TOGGLE_MUSIC: u32 = 4;
/// value = playlist track index.
pub const ACTION_PLAY_TRACK: u32 = 5;
pub const ACTION_CELEBRATE: u32 = 6;
pub const ACTION_LAUNCH_WISH: u32 = 7;
pub const ACTION_COPY_WISHES: u32 = 8;
pub const ACTION_START_OVER: u32 = 9;
