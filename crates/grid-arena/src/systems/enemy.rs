//! Enemy behaviour: direct pursuit with per-axis wall sliding, and a
//! jittered reload timer for ranged attacks.

use glam::Vec3;

use crate::api::config::{ArenaConfig, EnemyConfig};
use crate::api::types::Owner;
use crate::components::enemy::Enemy;
use crate::components::player::Player;
use crate::core::collision::{resolve_box, Aabb, ContactRule};
use crate::core::grid::TileGrid;
use crate::core::rng::Rng;
use crate::systems::projectile::{aim_direction, BulletPool};

/// Place `config.count` enemies at `rand(0..=spawn_span) + 0.5` on x and z,
/// re-rolling picks whose body would overlap a wall or leave the map.
pub fn spawn_enemies(config: &ArenaConfig, grid: &TileGrid, rng: &mut Rng) -> Vec<Enemy> {
    let enemy = &config.enemy;
    (0..enemy.count)
        .map(|_| {
            let position = spawn_point(enemy, config.ground_height, grid, rng);
            let shoot_timer = rng.unit() * enemy.shoot_cooldown;
            Enemy::new(position, enemy, shoot_timer)
        })
        .collect()
}

fn spawn_point(enemy: &EnemyConfig, ground: f32, grid: &TileGrid, rng: &mut Rng) -> Vec3 {
    let roll = |rng: &mut Rng| {
        Vec3::new(
            rng.range_inclusive(0, enemy.spawn_span) as f32 + 0.5,
            ground,
            rng.range_inclusive(0, enemy.spawn_span) as f32 + 0.5,
        )
    };

    // Cells are centred on whole coordinates, so a spawn point sits on a
    // cell edge and the body can reach into a neighbour.
    let blocked = |position: Vec3| {
        let body = Aabb::from_foot(position, enemy.size);
        resolve_box(grid, &body, position, ContactRule::Blocking).collided
    };

    let mut position = roll(rng);
    for attempt in 0..enemy.spawn_attempts {
        if !blocked(position) {
            break;
        }
        log::debug!("enemy spawn at {} is blocked, re-roll {}", position, attempt + 1);
        position = roll(rng);
    }
    position
}

/// Run one tick of AI for every active enemy, in slot order.
pub fn update_enemies(
    enemies: &mut [Enemy],
    player: &Player,
    pool: &mut BulletPool,
    grid: &TileGrid,
    dt: f32,
    rng: &mut Rng,
    config: &ArenaConfig,
) {
    for enemy in enemies.iter_mut().filter(|e| e.active) {
        update_enemy(enemy, player, pool, grid, dt, rng, config);
    }
}

fn update_enemy(
    enemy: &mut Enemy,
    player: &Player,
    pool: &mut BulletPool,
    grid: &TileGrid,
    dt: f32,
    rng: &mut Rng,
    config: &ArenaConfig,
) {
    let tuning = &config.enemy;
    enemy.vitality.tick(dt);

    let to_player = player.position() - enemy.position();
    let distance = to_player.length();

    if distance > tuning.personal_space {
        let step = to_player.normalize_or_zero() * enemy.body.speed;
        enemy.body.slide(step, |body| {
            resolve_box(grid, &body.bounds(), body.position, ContactRule::Blocking).collided
        });
    }

    enemy.shoot_timer -= dt;
    if enemy.shoot_timer <= 0.0 && distance < tuning.firing_range {
        let origin = enemy.body.eye(config.eye_height);
        if let Some(direction) = aim_direction(origin, player.body.eye(config.eye_height)) {
            pool.fire(origin, direction, Owner::Enemy);
        }
        enemy.shoot_timer = enemy.shoot_cooldown + rng.jitter(tuning.shoot_jitter);
    }
}
