pub mod combat;
pub mod enemy;
pub mod player;
pub mod projectile;
