// decor/mod.rs
//
// The decorative scene: the ambient 3D shape field rendered behind the
// panels, the background starfield, and the camera that projects them.

pub mod camera;
pub mod field;
pub mod shape;
pub mod starfield;

pub use camera::{CameraUniform, SceneCamera};
pub use field::DecorField;
pub use shape::{Shape, ShapeSet, ShapeVariant};
pub use starfield::Starfield;
