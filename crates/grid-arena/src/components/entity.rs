use glam::Vec3;

use crate::core::collision::Aabb;

/// Spatial record shared by the player and enemies.
///
/// `position` is the centre of the entity's bottom face ("foot"), so the
/// body spans `[position.y, position.y + size.y]` vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Foot position in world space.
    pub position: Vec3,
    /// Bounding extents.
    pub size: Vec3,
    /// Horizontal distance covered per tick.
    pub speed: f32,
}

impl Body {
    pub fn new(position: Vec3, size: Vec3, speed: f32) -> Self {
        Self {
            position,
            size,
            speed,
        }
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_foot(self.position, self.size)
    }

    /// Point bullets leave from and are aimed at.
    pub fn eye(&self, height: f32) -> Vec3 {
        self.position + Vec3::new(0.0, height, 0.0)
    }

    /// Move by `step` one horizontal axis at a time (x, then z).
    ///
    /// After each axis the body is tested with `is_blocked`, and that axis
    /// alone is reverted on a hit. Blocking one axis never cancels the
    /// other, which is what lets entities slide along walls.
    /// Returns true if either axis was reverted.
    pub fn slide(&mut self, step: Vec3, mut is_blocked: impl FnMut(&Body) -> bool) -> bool {
        let mut blocked = false;

        if step.x != 0.0 {
            let previous = self.position.x;
            self.position.x += step.x;
            if is_blocked(self) {
                self.position.x = previous;
                blocked = true;
            }
        }

        if step.z != 0.0 {
            let previous = self.position.z;
            self.position.z += step.z;
            if is_blocked(self) {
                self.position.z = previous;
                blocked = true;
            }
        }

        blocked
    }
}
