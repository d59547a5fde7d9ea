pub mod collision;
pub mod grid;
pub mod rng;
pub mod time;
pub mod world;
