//! Flat per-tick state handed to the presentation layer.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Player: 1 × 10 floats]
//! [Enemies: enemy_count × 10 floats]   one record per slot, dead ones included
//! [Bullets: bullet_count × 6 floats]   live bullets only
//! ```
//!
//! Counts are written into the header every capture so readers can compute
//! offsets without knowing the config.

use bytemuck::{Pod, Zeroable};

use crate::components::bullet::Bullet;
use crate::components::enemy::Enemy;
use crate::components::player::Player;
use crate::core::grid::TileGrid;
use crate::core::world::World;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_SESSION: usize = 1;
pub const HEADER_TICK: usize = 2;
pub const HEADER_ENEMY_COUNT: usize = 3;
pub const HEADER_BULLET_COUNT: usize = 4;
pub const HEADER_GRID_WIDTH: usize = 5;
pub const HEADER_GRID_HEIGHT: usize = 6;
pub const HEADER_ACTIVE_ENEMIES: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per actor record (wire format, never changes).
pub const ACTOR_FLOATS: usize = 10;

/// Floats per bullet record (wire format, never changes).
pub const BULLET_FLOATS: usize = 6;

/// Player or enemy state, enough to draw a sprite, a health bar and a
/// minimap dot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ActorSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub health: f32,
    pub max_health: f32,
    /// 1.0 while the actor takes part in the simulation.
    pub active: f32,
    /// 1.0 inside the hit window.
    pub hit: f32,
    /// Sprite row, see [`crate::Facing`]. Always 0 for enemies.
    pub facing: f32,
    pub map_u: f32,
    pub map_v: f32,
}

impl ActorSnapshot {
    pub fn from_player(player: &Player, grid: &TileGrid) -> Self {
        let p = player.position();
        let uv = grid.minimap_uv(p);
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            health: player.vitality.health() as f32,
            max_health: player.vitality.max() as f32,
            active: 1.0,
            hit: flag(player.vitality.is_hit()),
            facing: player.facing.as_f32(),
            map_u: uv.x,
            map_v: uv.y,
        }
    }

    pub fn from_enemy(enemy: &Enemy, grid: &TileGrid) -> Self {
        let p = enemy.position();
        let uv = grid.minimap_uv(p);
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            health: enemy.vitality.health() as f32,
            max_health: enemy.vitality.max() as f32,
            active: flag(enemy.active),
            hit: flag(enemy.vitality.is_hit()),
            facing: 0.0,
            map_u: uv.x,
            map_v: uv.y,
        }
    }
}

/// One live bullet.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BulletSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// 1.0 for player shots.
    pub from_player: f32,
    /// Pool slot the bullet occupies.
    pub slot: f32,
}

impl BulletSnapshot {
    pub fn new(bullet: &Bullet, slot: usize) -> Self {
        Self {
            x: bullet.position.x,
            y: bullet.position.y,
            z: bullet.position.z,
            radius: bullet.radius,
            from_player: flag(bullet.from_player()),
            slot: slot as f32,
        }
    }
}

/// Everything the presentation layer needs after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub defeated: bool,
    pub tick: u64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub player: ActorSnapshot,
    pub enemies: Vec<ActorSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let grid = world.grid();
        Self {
            defeated: world.session().is_over(),
            tick: world.tick(),
            grid_width: grid.width,
            grid_height: grid.height,
            player: ActorSnapshot::from_player(&world.player, grid),
            enemies: world
                .enemies
                .iter()
                .map(|e| ActorSnapshot::from_enemy(e, grid))
                .collect(),
            bullets: world
                .bullets
                .slots()
                .iter()
                .enumerate()
                .filter(|(_, b)| b.active)
                .map(|(slot, b)| BulletSnapshot::new(b, slot))
                .collect(),
        }
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active > 0.0).count()
    }

    /// Total length of the packed buffer in floats.
    pub fn float_len(&self) -> usize {
        HEADER_FLOATS
            + ACTOR_FLOATS
            + self.enemies.len() * ACTOR_FLOATS
            + self.bullets.len() * BULLET_FLOATS
    }

    /// Pack into the flat layout described at the top of this module.
    pub fn write_floats(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.float_len());

        let mut header = [0.0f32; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_SESSION] = flag(self.defeated);
        header[HEADER_TICK] = self.tick as f32;
        header[HEADER_ENEMY_COUNT] = self.enemies.len() as f32;
        header[HEADER_BULLET_COUNT] = self.bullets.len() as f32;
        header[HEADER_GRID_WIDTH] = self.grid_width as f32;
        header[HEADER_GRID_HEIGHT] = self.grid_height as f32;
        header[HEADER_ACTIVE_ENEMIES] = self.active_enemies() as f32;
        out.extend_from_slice(&header);

        out.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(&self.player)));
        out.extend_from_slice(bytemuck::cast_slice(&self.enemies));
        out.extend_from_slice(bytemuck::cast_slice(&self.bullets));
    }

    pub fn to_floats(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.float_len());
        self.write_floats(&mut out);
        out
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}
