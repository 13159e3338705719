use glam::Vec3;

use crate::types::ShapeId;

/// Per-frame rotation amplitude of the bobbing sinusoid.
pub const BOB_AMPLITUDE: f32 = 0.01;

/// The closed set of decorative shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeVariant {
    /// Extruded heart mesh.
    Heart,
    /// Composite gift-box group.
    Gift,
    /// Faceted star.
    Star,
}

impl ShapeVariant {
    /// Numeric code written into the render instance for the JS mesh lookup.
    pub fn code(self) -> f32 {
        match self {
            ShapeVariant::Heart => 0.0,
            ShapeVariant::Gift => 1.0,
            ShapeVariant::Star => 2.0,
        }
    }
}

/// One ambient decorative shape. Created once at mount; its phase and
/// speed are randomized at creation and fixed for its lifetime, and
/// `rest_pos` keeps the original position so a recall can animate back.
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: ShapeId,
    pub variant: ShapeVariant,
    /// Position in world space.
    pub pos: Vec3,
    /// Rotation in radians per axis.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Phase offset of the bobbing sinusoid.
    pub phase: f32,
    /// Oscillation speed of the bobbing sinusoid.
    pub speed: f32,
    /// Original position, the target of a recall.
    pub rest_pos: Vec3,
}

impl Shape {
    /// Create a shape at rest at `pos`.
    pub fn new(id: ShapeId, variant: ShapeVariant, pos: Vec3) -> Self {
        Self {
            id,
            variant,
            pos,
            rotation: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
            phase: 0.0,
            speed: 0.1,
            rest_pos: pos,
        }
    }

    // -- Builder pattern --

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_motion(mut self, phase: f32, speed: f32) -> Self {
        self.phase = phase;
        self.speed = speed;
        self
    }

    /// Advance the bobbing oscillation for the given scene time.
    /// The sinusoid of absolute time keeps shapes desynchronized from each
    /// other (per-shape phase/speed) without per-frame jumps.
    pub fn bob(&mut self, time: f32) {
        self.rotation.y += (time * self.speed + self.phase).sin() * BOB_AMPLITUDE;
    }
}

/// Flat-Vec shape storage. The population is fixed at mount, so there is
/// no despawn: the count is an invariant for the lifetime of the view.
pub struct ShapeSet {
    shapes: Vec<Shape>,
}

impl ShapeSet {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(capacity),
        }
    }

    /// Add a shape to the set.
    pub fn spawn(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Get a reference to a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Iterate over all shapes.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Iterate over all shapes mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    /// Number of shapes in the set.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::new()
    }
}
