use crate::core::rng::Rng;
use crate::render::instance::StarInstance;

/// Number of background star points.
pub const STAR_COUNT: usize = 1500;

/// Half-extent of the star volume on each axis, in world units.
/// Much larger and sparser than the shape field so the stars read as a
/// distant backdrop.
const STAR_EXTENT: f32 = 50.0;

/// Static background star-point cloud. Built once at mount; never mutated.
pub struct Starfield {
    points: Vec<StarInstance>,
}

impl Starfield {
    pub fn new(rng: &mut Rng) -> Self {
        let mut points = Vec::with_capacity(STAR_COUNT);
        for _ in 0..STAR_COUNT {
            points.push(StarInstance {
                x: rng.range(-STAR_EXTENT, STAR_EXTENT),
                y: rng.range(-STAR_EXTENT, STAR_EXTENT),
                z: rng.range(-STAR_EXTENT, STAR_EXTENT),
                brightness: rng.range(0.3, 1.0),
            });
        }
        Self { points }
    }

    pub fn points(&self) -> &[StarInstance] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
