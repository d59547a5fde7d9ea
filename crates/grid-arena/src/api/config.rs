use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::time::DEFAULT_MAX_STEPS;
use crate::error::ArenaError;

/// Tunables for the player entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Foot position at session start.
    pub spawn: Vec3,
    /// Bounding extents (x, y, z).
    pub size: Vec3,
    /// Horizontal distance covered per tick on each active axis.
    pub speed: f32,
    /// Upward velocity set by a jump, in units per tick.
    pub jump_force: f32,
    /// Velocity removed per airborne tick.
    pub gravity: f32,
    pub max_health: i32,
    /// Invulnerability after a counted hit, in seconds.
    pub hit_window: f32,
    /// Minimum time between player shots, in seconds.
    pub fire_cooldown: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 0.5, -2.0),
            size: Vec3::splat(0.5),
            speed: 0.25,
            jump_force: 0.2,
            gravity: 0.01,
            max_health: 100,
            hit_window: 0.5,
            fire_cooldown: 0.5,
        }
    }
}

/// Tunables shared by every enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Enemies spawned at session start.
    pub count: usize,
    pub size: Vec3,
    /// Pursuit distance per tick.
    pub speed: f32,
    pub max_health: i32,
    /// Base interval between shots, in seconds.
    pub shoot_cooldown: f32,
    /// Half-width of the uniform jitter added to every reload.
    pub shoot_jitter: f32,
    /// Invulnerability after a counted hit, in seconds.
    pub hit_window: f32,
    /// Enemies stop closing in once this near to the player.
    pub personal_space: f32,
    /// Enemies only fire when the player is closer than this.
    pub firing_range: f32,
    /// Spawn coordinates are drawn from `0..=spawn_span` (plus half a cell).
    pub spawn_span: i32,
    /// Re-rolls allowed when a spawn lands in a solid cell.
    pub spawn_attempts: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 10,
            size: Vec3::splat(0.5),
            speed: 0.13,
            max_health: 30,
            shoot_cooldown: 2.0,
            shoot_jitter: 0.5,
            hit_window: 0.2,
            personal_space: 3.0,
            firing_range: 10.0,
            spawn_span: 10,
            spawn_attempts: 8,
        }
    }
}

/// Tunables for the bullet pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Fixed number of bullet slots. Zero disables firing entirely.
    pub capacity: usize,
    /// Distance travelled per tick.
    pub speed: f32,
    pub radius: f32,
    /// Bullets farther than this from the world origin expire.
    pub max_distance: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            speed: 0.3,
            radius: 0.15,
            max_distance: 50.0,
        }
    }
}

/// Configuration for a whole arena session.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most ticks the runner may run for one frame. Excess time is dropped.
    pub max_steps: u32,
    /// Seed for spawn placement and reload jitter.
    pub seed: u64,
    /// Lowest foot height the player can occupy.
    pub ground_height: f32,
    /// Offset from an entity's foot to the point bullets leave from.
    pub eye_height: f32,
    /// How far a foot may sit from a cell top and still count as standing on it.
    pub ground_tolerance: f32,
    /// Health removed by one counted bullet hit.
    pub damage: i32,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps: DEFAULT_MAX_STEPS,
            seed: 42,
            ground_height: 0.5,
            eye_height: 0.5,
            ground_tolerance: 0.1,
            damage: 10,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the simulation invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        positive("fixed_dt", self.fixed_dt)?;
        if self.max_steps == 0 {
            return Err(ArenaError::InvalidConfig(
                "max_steps must be at least 1".to_string(),
            ));
        }
        non_negative("ground_height", self.ground_height)?;
        non_negative("eye_height", self.eye_height)?;
        non_negative("ground_tolerance", self.ground_tolerance)?;
        if self.damage < 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "damage must not be negative, got {}",
                self.damage
            )));
        }

        let p = &self.player;
        extents("player.size", p.size)?;
        non_negative("player.speed", p.speed)?;
        non_negative("player.jump_force", p.jump_force)?;
        non_negative("player.gravity", p.gravity)?;
        health("player.max_health", p.max_health)?;
        positive("player.hit_window", p.hit_window)?;
        non_negative("player.fire_cooldown", p.fire_cooldown)?;
        if !p.spawn.is_finite() {
            return Err(ArenaError::InvalidConfig(
                "player.spawn must be finite".to_string(),
            ));
        }

        let e = &self.enemy;
        extents("enemy.size", e.size)?;
        non_negative("enemy.speed", e.speed)?;
        health("enemy.max_health", e.max_health)?;
        non_negative("enemy.shoot_cooldown", e.shoot_cooldown)?;
        non_negative("enemy.shoot_jitter", e.shoot_jitter)?;
        positive("enemy.hit_window", e.hit_window)?;
        non_negative("enemy.personal_space", e.personal_space)?;
        non_negative("enemy.firing_range", e.firing_range)?;
        if e.spawn_span < 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "enemy.spawn_span must not be negative, got {}",
                e.spawn_span
            )));
        }

        let b = &self.bullet;
        non_negative("bullet.speed", b.speed)?;
        non_negative("bullet.radius", b.radius)?;
        non_negative("bullet.max_distance", b.max_distance)?;
        Ok(())
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ArenaError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ArenaError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ArenaError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ArenaError::InvalidConfig(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn extents(name: &str, size: Vec3) -> Result<(), ArenaError> {
    if size.is_finite() && size.cmpgt(Vec3::ZERO).all() {
        Ok(())
    } else {
        Err(ArenaError::InvalidConfig(format!(
            "{name} must be positive on every axis, got {size}"
        )))
    }
}

fn health(name: &str, value: i32) -> Result<(), ArenaError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ArenaError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
