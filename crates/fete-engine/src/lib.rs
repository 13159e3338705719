pub mod anim;
pub mod config;
pub mod core;
pub mod decor;
pub mod effects;
pub mod input;
pub mod overlay;
pub mod player;
pub mod render;
pub mod steps;
pub mod types;
pub mod viewer;
pub mod wishes;

// Re-export key types at crate root for convenience
pub use anim::{ease, ease_vec3, lerp, Easing, Tween, TweenId, TweenState, TweenTarget};
pub use config::{BentoItem, Photo, PresentationConfig, Track, Video, VideoSource};
pub use self::core::{Clock, Rng};
pub use decor::{CameraUniform, DecorField, SceneCamera, Shape, ShapeSet, ShapeVariant, Starfield};
pub use effects::{Confetti, ConfettiColor, ConfettiState};
pub use input::{InputEvent, InputQueue};
pub use overlay::GalleryOverlay;
pub use player::{PlayerCommand, PlayerController, PlayerPhase};
pub use render::{ConfettiInstance, PanelState, ShapeInstance, StarInstance};
pub use steps::{Panel, Step, StepSequencer};
pub use types::{ShapeId, ViewerEvent};
pub use viewer::Viewer;
pub use wishes::{CopyStatus, LaunchPhase, LaunchScript, MemoryStore, WishLedger, WishStore};
