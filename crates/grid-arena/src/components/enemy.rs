use glam::Vec3;

use crate::api::config::EnemyConfig;
use crate::components::entity::Body;
use crate::components::health::Vitality;
use crate::core::collision::Aabb;

/// A pursuing, shooting enemy. Dead enemies keep their slot with
/// `active == false` and are skipped by every system.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    /// Seconds until the next shot may be taken.
    pub shoot_timer: f32,
    /// Base reload interval.
    pub shoot_cooldown: f32,
    pub active: bool,
    pub vitality: Vitality,
}

impl Enemy {
    pub fn new(position: Vec3, config: &EnemyConfig, shoot_timer: f32) -> Self {
        Self {
            body: Body::new(position, config.size, config.speed),
            shoot_timer,
            shoot_cooldown: config.shoot_cooldown,
            active: true,
            vitality: Vitality::new(config.max_health),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
