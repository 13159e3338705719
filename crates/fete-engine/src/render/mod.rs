// render/mod.rs
//
// Wire format shared with the JS renderer: Pod instance structs and the
// protocol constants that must stay in sync with the TypeScript side.

pub mod instance;
pub mod protocol;

pub use instance::{ConfettiInstance, PanelState, ShapeInstance, StarInstance};
