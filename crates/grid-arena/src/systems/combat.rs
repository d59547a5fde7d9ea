//! Bullet impact resolution: walls, then the player, then enemies.

use crate::api::config::ArenaConfig;
use crate::components::bullet::Bullet;
use crate::components::enemy::Enemy;
use crate::components::player::Player;
use crate::core::collision::{resolve_sphere, sphere_vs_box};
use crate::core::grid::TileGrid;
use crate::systems::projectile::BulletPool;

/// What a bullet struck this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Left the map or hit a wall.
    Map,
    /// Struck the player. `counted` is false when the hit window absorbed it.
    Player { counted: bool },
    /// Struck the enemy in slot `index`.
    Enemy { index: usize, counted: bool },
}

/// Resolve every live bullet against the map and its valid targets.
///
/// A bullet is consumed by the first thing it touches, whether or not the
/// target's hit window let the damage through.
pub fn resolve_hits(
    pool: &mut BulletPool,
    player: &mut Player,
    enemies: &mut [Enemy],
    grid: &TileGrid,
    config: &ArenaConfig,
) -> Vec<Impact> {
    let mut impacts = Vec::new();
    for bullet in pool.iter_mut() {
        if let Some(impact) = resolve_bullet(bullet, player, enemies, grid, config) {
            bullet.active = false;
            impacts.push(impact);
        }
    }
    impacts
}

fn resolve_bullet(
    bullet: &Bullet,
    player: &mut Player,
    enemies: &mut [Enemy],
    grid: &TileGrid,
    config: &ArenaConfig,
) -> Option<Impact> {
    if resolve_sphere(grid, bullet.position, bullet.radius) {
        return Some(Impact::Map);
    }

    if !bullet.from_player() {
        if !sphere_vs_box(bullet.position, bullet.radius, &player.bounds()) {
            return None;
        }
        let counted = player
            .vitality
            .take_hit(config.damage, config.player.hit_window);
        return Some(Impact::Player { counted });
    }

    let (index, enemy) = enemies
        .iter_mut()
        .enumerate()
        .filter(|(_, e)| e.active)
        .find(|(_, e)| sphere_vs_box(bullet.position, bullet.radius, &e.bounds()))?;

    let counted = enemy
        .vitality
        .take_hit(config.damage, config.enemy.hit_window);
    if counted && enemy.vitality.is_depleted() {
        enemy.active = false;
        log::debug!("enemy {} defeated", index);
    }
    Some(Impact::Enemy { index, counted })
}
