use glam::Vec3;

use crate::api::types::Owner;

/// One bullet slot. Inactive slots are free for reuse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    /// Sphere centre.
    pub position: Vec3,
    /// Horizontal unit vector (y = 0).
    pub direction: Vec3,
    /// Distance per tick.
    pub speed: f32,
    pub radius: f32,
    pub active: bool,
    pub owner: Owner,
}

impl Bullet {
    /// An empty slot.
    pub fn inactive() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            speed: 0.0,
            radius: 0.0,
            active: false,
            owner: Owner::Enemy,
        }
    }

    pub fn from_player(&self) -> bool {
        self.owner == Owner::Player
    }
}

impl Default for Bullet {
    fn default() -> Self {
        Self::inactive()
    }
}
