pub mod bullet;
pub mod enemy;
pub mod entity;
pub mod health;
pub mod player;
