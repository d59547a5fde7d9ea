//! Player movement: instant horizontal steps with per-axis wall sliding,
//! plus integrated vertical motion with landing on cell tops.

use glam::Vec3;

use crate::api::config::ArenaConfig;
use crate::api::types::Owner;
use crate::components::player::{Player, Stance};
use crate::core::collision::{resolve_box, ContactRule};
use crate::core::grid::TileGrid;
use crate::input::intent::MoveIntent;
use crate::systems::projectile::{aim_direction, BulletPool};

/// Count down the player's hit window and fire cooldown.
pub fn tick_timers(player: &mut Player, dt: f32) {
    player.vitality.tick(dt);
    if player.fire_cooldown > 0.0 {
        player.fire_cooldown = (player.fire_cooldown - dt).max(0.0);
    }
}

/// Apply one tick of horizontal movement.
///
/// Each axis is reverted on its own when the moved body blocks against the
/// grid, so diagonal input slides along walls. Overlaps that only graze a
/// cell top count as standing on it and mark the player grounded.
pub fn move_horizontal(player: &mut Player, grid: &TileGrid, intent: MoveIntent, config: &ArenaConfig) {
    if let Some(facing) = intent.facing() {
        player.facing = facing;
    }

    let rule = ContactRule::GroundAware {
        tolerance: config.ground_tolerance,
    };
    let step = intent.vector() * player.body.speed;
    player
        .body
        .slide(step, |body| resolve_box(grid, &body.bounds(), body.position, rule).collided);

    let contact = resolve_box(grid, &player.bounds(), player.position(), rule);
    if contact.ground_contact || player.body.position.y <= config.ground_height {
        player.stance = Stance::Grounded;
    }
}

/// Start a jump. Only possible while grounded. Returns whether it happened.
pub fn jump(player: &mut Player) -> bool {
    if !player.is_grounded() {
        return false;
    }
    player.velocity_y = player.jump_force;
    player.stance = Stance::Airborne;
    true
}

/// Fire from the player's eye toward a world-space aim point.
///
/// Ignored while the fire cooldown runs or when the aim point sits straight
/// above or below the eye (no horizontal direction). The cooldown restarts
/// whenever a direction exists, even if the pool rejects the shot.
pub fn fire(player: &mut Player, aim: Vec3, pool: &mut BulletPool, eye_height: f32) -> Option<usize> {
    if !player.can_fire() {
        return None;
    }
    let origin = player.body.eye(eye_height);
    let direction = aim_direction(origin, aim)?;
    player.fire_cooldown = player.fire_interval;
    pool.fire(origin, direction, Owner::Player)
}

/// Integrate gravity and resolve the player's vertical position.
///
/// Falling players land on a cell whose top lies within `ground_tolerance`
/// above their new foot height; the foot snaps to the top exactly. Nothing
/// ever leaves the player below `ground_height`.
pub fn integrate_vertical(player: &mut Player, grid: &TileGrid, config: &ArenaConfig) {
    match player.stance {
        Stance::Airborne => player.velocity_y -= player.gravity,
        Stance::Grounded if player.velocity_y < 0.0 => player.velocity_y = 0.0,
        Stance::Grounded => {}
    }
    player.body.position.y += player.velocity_y;

    if player.body.position.y <= config.ground_height {
        player.body.position.y = config.ground_height;
        player.velocity_y = 0.0;
        player.stance = Stance::Grounded;
        return;
    }

    player.stance = if player.velocity_y < 0.0 {
        land(player, grid, config.ground_tolerance)
    } else if player.velocity_y == 0.0 && is_supported(player, grid, config.ground_tolerance) {
        Stance::Grounded
    } else {
        Stance::Airborne
    };
}

fn land(player: &mut Player, grid: &TileGrid, tolerance: f32) -> Stance {
    let bounds = player.bounds();
    let bottom = bounds.min.y;
    let landing = grid.solid_neighbours(player.position()).find(|cell| {
        bottom <= cell.max.y && bottom >= cell.max.y - tolerance && bounds.overlaps(cell)
    });

    match landing {
        Some(cell) => {
            player.body.position.y = cell.max.y;
            player.velocity_y = 0.0;
            Stance::Grounded
        }
        None => Stance::Airborne,
    }
}

/// A player at rest on a cell top keeps standing while a cell is still
/// underfoot.
fn is_supported(player: &Player, grid: &TileGrid, tolerance: f32) -> bool {
    let bounds = player.bounds();
    grid.solid_neighbours(player.position()).any(|cell| {
        bounds.overlaps_footprint(&cell) && (bounds.min.y - cell.max.y).abs() < tolerance
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Facing;
    use approx::assert_relative_eq;

    fn open_grid() -> TileGrid {
        TileGrid::from_ascii(
            "\
            .......\n\
            .......\n\
            .......\n\
            .......\n\
            .......\n\
            .......\n\
            .......",
            Vec3::ZERO,
        )
        .unwrap()
    }

    fn player_at(position: Vec3) -> Player {
        let mut player = Player::spawn(&Default::default());
        player.body.position = position;
        player
    }

    #[test]
    fn moves_and_faces_the_input() {
        let grid = open_grid();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(3.0, 0.5, 3.0));
        move_horizontal(&mut p, &grid, MoveIntent::Left, &config);
        assert_eq!(p.position(), Vec3::new(2.75, 0.5, 3.0));
        assert_eq!(p.facing, Facing::Left);

        move_horizontal(&mut p, &grid, MoveIntent::Idle, &config);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn jump_requires_ground() {
        let mut p = player_at(Vec3::new(3.0, 0.5, 3.0));
        assert!(jump(&mut p));
        assert_eq!(p.velocity_y, 0.2);
        assert_eq!(p.stance, Stance::Airborne);
        assert!(!jump(&mut p));
    }

    #[test]
    fn gravity_pulls_an_airborne_player() {
        let grid = open_grid();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(3.0, 2.0, 3.0));
        p.stance = Stance::Airborne;
        integrate_vertical(&mut p, &grid, &config);
        assert_relative_eq!(p.velocity_y, -0.01);
        assert_relative_eq!(p.position().y, 1.99);
        assert_eq!(p.stance, Stance::Airborne);
    }

    #[test]
    fn ground_height_is_a_hard_floor() {
        let grid = open_grid();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(3.0, 0.52, 3.0));
        p.stance = Stance::Airborne;
        p.velocity_y = -0.3;
        integrate_vertical(&mut p, &grid, &config);
        assert_eq!(p.position().y, 0.5);
        assert_eq!(p.velocity_y, 0.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn falling_onto_a_block_snaps_to_its_top() {
        let grid = TileGrid::from_ascii("...\n.#.\n...", Vec3::ZERO).unwrap();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(1.0, 1.04, 1.0));
        p.stance = Stance::Airborne;
        p.velocity_y = -0.05;
        integrate_vertical(&mut p, &grid, &config);
        assert_eq!(p.position().y, 1.0);
        assert_eq!(p.velocity_y, 0.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn resting_on_a_block_stays_grounded() {
        let grid = TileGrid::from_ascii("...\n.#.\n...", Vec3::ZERO).unwrap();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(1.0, 1.0, 1.0));
        for _ in 0..5 {
            integrate_vertical(&mut p, &grid, &config);
        }
        assert_eq!(p.position().y, 1.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn walking_off_a_block_starts_a_fall() {
        let grid = TileGrid::from_ascii("....\n.#..\n....", Vec3::ZERO).unwrap();
        let config = ArenaConfig::default();
        let mut p = player_at(Vec3::new(2.5, 1.0, 1.0));
        integrate_vertical(&mut p, &grid, &config);
        assert_eq!(p.stance, Stance::Airborne);
        integrate_vertical(&mut p, &grid, &config);
        assert!(p.position().y < 1.0);
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut pool = BulletPool::new(&Default::default());
        let mut p = player_at(Vec3::new(0.0, 0.5, 0.0));
        let aim = Vec3::new(5.0, 1.0, 0.0);
        assert_eq!(fire(&mut p, aim, &mut pool, 0.5), Some(0));
        assert_eq!(fire(&mut p, aim, &mut pool, 0.5), None);

        tick_timers(&mut p, 0.5);
        assert_eq!(fire(&mut p, aim, &mut pool, 0.5), Some(1));

        let shot = pool.slots()[0];
        assert_eq!(shot.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(shot.direction, Vec3::X);
        assert!(shot.from_player());
    }

    #[test]
    fn aiming_straight_down_does_nothing() {
        let mut pool = BulletPool::new(&Default::default());
        let mut p = player_at(Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(fire(&mut p, Vec3::new(0.0, -3.0, 0.0), &mut pool, 0.5), None);
        assert!(p.can_fire());
        assert_eq!(pool.active_count(), 0);
    }
}
