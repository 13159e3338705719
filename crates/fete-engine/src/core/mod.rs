pub mod clock;
pub mod rng;

pub use clock::Clock;
pub use rng::Rng;
