use glam::Vec3;

use crate::api::config::PlayerConfig;
use crate::api::types::Facing;
use crate::components::entity::Body;
use crate::components::health::Vitality;
use crate::core::collision::Aabb;

/// Vertical state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Grounded,
    Airborne,
}

/// The player-controlled entity. Created once per session, never despawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Vertical velocity in units per tick. Horizontal motion is positional.
    pub velocity_y: f32,
    pub stance: Stance,
    pub jump_force: f32,
    pub gravity: f32,
    pub facing: Facing,
    pub vitality: Vitality,
    /// Seconds until the player may fire again.
    pub fire_cooldown: f32,
    /// Cooldown applied after each shot.
    pub fire_interval: f32,
}

impl Player {
    pub fn spawn(config: &PlayerConfig) -> Self {
        Self {
            body: Body::new(config.spawn, config.size, config.speed),
            velocity_y: 0.0,
            stance: Stance::Grounded,
            jump_force: config.jump_force,
            gravity: config.gravity,
            facing: Facing::Down,
            vitality: Vitality::new(config.max_health),
            fire_cooldown: 0.0,
            fire_interval: config.fire_cooldown,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    pub fn is_grounded(&self) -> bool {
        self.stance == Stance::Grounded
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_grounded_at_full_health() {
        let p = Player::spawn(&PlayerConfig::default());
        assert_eq!(p.position(), Vec3::new(0.0, 0.5, -2.0));
        assert!(p.is_grounded());
        assert_eq!(p.vitality.health(), 100);
        assert_eq!(p.facing, Facing::Down);
        assert!(p.can_fire());
    }
}
