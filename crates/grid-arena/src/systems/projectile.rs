//! Fixed-capacity bullet pool.
//!
//! Slots are never added or removed after construction. A fire reuses the
//! first inactive slot; once every slot is live the oldest allocation is
//! overwritten in ring-buffer order.

use glam::Vec3;

use crate::api::config::BulletConfig;
use crate::api::types::Owner;
use crate::components::bullet::Bullet;

#[derive(Debug, Clone)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    /// Successful fires since the pool was created.
    fired: u64,
    speed: f32,
    radius: f32,
    max_distance: f32,
}

impl BulletPool {
    pub fn new(config: &BulletConfig) -> Self {
        Self {
            slots: vec![Bullet::inactive(); config.capacity],
            fired: 0,
            speed: config.speed,
            radius: config.radius,
            max_distance: config.max_distance,
        }
    }

    /// Spawn a bullet. Returns the slot used, or `None` for a zero-capacity pool.
    pub fn fire(&mut self, origin: Vec3, direction: Vec3, owner: Owner) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        let index = match self.slots.iter().position(|b| !b.active) {
            Some(free) => free,
            None => {
                let oldest = (self.fired % self.slots.len() as u64) as usize;
                log::debug!("bullet pool saturated, evicting slot {}", oldest);
                oldest
            }
        };

        self.slots[index] = Bullet {
            position: origin,
            direction,
            speed: self.speed,
            radius: self.radius,
            active: true,
            owner,
        };
        self.fired += 1;
        Some(index)
    }

    /// Move every live bullet one tick and expire those past the range limit.
    pub fn advance(&mut self, dt: f32) {
        for bullet in self.slots.iter_mut().filter(|b| b.active) {
            advance_bullet(bullet, dt, self.max_distance);
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn slots(&self) -> &[Bullet] {
        &self.slots
    }

    /// Iterate over live bullets.
    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    /// Iterate over live bullets mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.slots.iter_mut().filter(|b| b.active)
    }
}

/// Move a bullet by one tick's worth of travel.
///
/// Travel is a fixed distance per tick; `_dt` is accepted so callers keep a
/// uniform system signature, but does not scale motion. A bullet farther
/// than `max_distance` from the world origin expires in the same call.
pub fn advance_bullet(bullet: &mut Bullet, _dt: f32, max_distance: f32) {
    bullet.position += bullet.direction * bullet.speed;
    if bullet.position.length() > max_distance {
        bullet.active = false;
    }
}

/// Horizontal unit vector from `from` toward `to`.
/// `None` when the two points coincide on the x/z plane.
pub fn aim_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let mut delta = to - from;
    delta.y = 0.0;
    delta.try_normalize()
}
