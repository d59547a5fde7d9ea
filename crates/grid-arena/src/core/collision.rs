//! Overlap primitives and grid contact resolution.
//!
//! Entities never query the whole map: every routine here looks at the
//! 3×3 block of cells around the entity's own cell, after a coarse
//! containment test against the map's overall bounds.

use glam::Vec3;

use crate::core::grid::TileGrid;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box whose bottom face is centred on `foot`, the way entity
    /// positions are stored.
    pub fn from_foot(foot: Vec3, size: Vec3) -> Self {
        let half = Vec3::new(size.x * 0.5, 0.0, size.z * 0.5);
        Self {
            min: foot - half,
            max: foot + half + Vec3::new(0.0, size.y, 0.0),
        }
    }

    /// Strict overlap on all three axes. Shared faces do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }

    /// Inclusive overlap: boxes that share a face or edge still touch.
    pub fn touches(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Strict overlap of the x/z footprints, ignoring height.
    pub fn overlaps_footprint(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    /// Point of the box nearest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.max(self.min).min(self.max)
    }

    /// Sphere test with a strict boundary: a sphere that only grazes the
    /// box (distance == radius) does not intersect it.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }
}

/// Standard box-vs-box overlap.
pub fn box_vs_box(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Sphere-vs-box overlap by per-axis clamping.
pub fn sphere_vs_box(center: Vec3, radius: f32, b: &Aabb) -> bool {
    b.intersects_sphere(center, radius)
}

/// How overlaps with solid cells are classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactRule {
    /// Any overlap blocks. Used for enemies.
    Blocking,
    /// Overlaps whose bottom face sits within `tolerance` of the cell top
    /// are ground contact; everything else blocks. Used for the player.
    GroundAware { tolerance: f32 },
}

/// Result of resolving a box against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridContact {
    /// A lateral (blocking) overlap, or the box left the map.
    pub collided: bool,
    /// The box rests on top of a solid cell.
    pub ground_contact: bool,
}

impl GridContact {
    const OUT_OF_BOUNDS: Self = Self {
        collided: true,
        ground_contact: false,
    };
}

/// Resolve `body` against the solid cells around `anchor`.
///
/// `anchor` is the entity position that picks the centre cell. A body that
/// no longer touches the map bounds at all is reported as collided without
/// looking at individual cells.
pub fn resolve_box(grid: &TileGrid, body: &Aabb, anchor: Vec3, rule: ContactRule) -> GridContact {
    if !body.touches(&grid.bounds()) {
        return GridContact::OUT_OF_BOUNDS;
    }

    let mut contact = GridContact::default();
    for cell in grid.solid_neighbours(anchor) {
        if !body.overlaps(&cell) {
            continue;
        }
        match rule {
            ContactRule::GroundAware { tolerance } if (body.min.y - cell.max.y).abs() < tolerance => {
                contact.ground_contact = true;
            }
            ContactRule::GroundAware { .. } => contact.collided = true,
            ContactRule::Blocking => {
                contact.collided = true;
                break;
            }
        }
    }
    contact
}

/// Whether a sphere has left the map or touches a solid cell near its centre.
pub fn resolve_sphere(grid: &TileGrid, center: Vec3, radius: f32) -> bool {
    if !grid.bounds().intersects_sphere(center, radius) {
        return true;
    }
    grid.solid_neighbours(center)
        .any(|cell| cell.intersects_sphere(center, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn from_foot_spans_upwards() {
        let b = Aabb::from_foot(Vec3::new(2.0, 0.5, 3.0), Vec3::splat(0.5));
        assert_eq!(b.min, Vec3::new(1.75, 0.5, 2.75));
        assert_eq!(b.max, Vec3::new(2.25, 1.0, 3.25));
    }

    #[rstest]
    #[case(Vec3::new(0.5, 0.5, 0.5), true)]
    #[case(Vec3::new(1.0, 0.0, 0.0), false)] // shares the x = 1 face
    #[case(Vec3::new(0.99, 0.99, 0.99), true)]
    #[case(Vec3::new(0.0, 1.0, 0.0), false)] // stacked on top
    #[case(Vec3::new(2.0, 0.0, 0.0), false)]
    fn box_overlap_is_strict(#[case] offset: Vec3, #[case] expected: bool) {
        let a = unit_box();
        let b = Aabb::new(offset, offset + Vec3::ONE);
        assert_eq!(box_vs_box(&a, &b), expected);
        assert_eq!(box_vs_box(&b, &a), expected);
    }

    #[test]
    fn touching_boxes_touch_but_do_not_overlap() {
        let a = unit_box();
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.touches(&b));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn sphere_grazing_a_face_does_not_collide() {
        let b = unit_box();
        // Centre exactly one radius in front of the x = 0 face.
        assert!(!sphere_vs_box(Vec3::new(-0.15, 0.5, 0.5), 0.15, &b));
        assert!(sphere_vs_box(Vec3::new(-0.149, 0.5, 0.5), 0.15, &b));
    }

    #[test]
    fn sphere_inside_box_collides() {
        assert!(sphere_vs_box(Vec3::splat(0.5), 0.01, &unit_box()));
    }

    #[test]
    fn sphere_near_corner_uses_true_distance() {
        let b = unit_box();
        // 0.1 past the corner on two axes: distance ~0.141.
        let c = Vec3::new(1.1, 1.1, 0.5);
        assert!(!sphere_vs_box(c, 0.14, &b));
        assert!(sphere_vs_box(c, 0.15, &b));
    }

    #[test]
    fn closest_point_clamps_each_axis() {
        let b = unit_box();
        assert_eq!(b.closest_point(Vec3::new(-1.0, 0.5, 3.0)), Vec3::new(0.0, 0.5, 1.0));
    }

    fn walled_grid() -> TileGrid {
        // Solid column at x = 4.
        TileGrid::from_ascii(
            "\
            ....#..\n\
            ....#..\n\
            ....#..\n\
            ....#..\n\
            ....#..\n\
            ....#..\n\
            ....#..",
            Vec3::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn box_clear_of_walls_does_not_collide() {
        let grid = walled_grid();
        let body = Aabb::from_foot(Vec3::new(3.0, 0.5, 3.0), Vec3::splat(0.5));
        let contact = resolve_box(&grid, &body, Vec3::new(3.0, 0.5, 3.0), ContactRule::Blocking);
        assert_eq!(contact, GridContact::default());
    }

    #[test]
    fn box_overlapping_neighbour_collides() {
        let grid = walled_grid();
        let foot = Vec3::new(3.3, 0.5, 3.0);
        let body = Aabb::from_foot(foot, Vec3::splat(0.5));
        let contact = resolve_box(&grid, &body, foot, ContactRule::Blocking);
        assert!(contact.collided);
        assert!(!contact.ground_contact);
    }

    #[test]
    fn cells_outside_the_neighbourhood_are_ignored() {
        let grid = TileGrid::from_ascii(".....\n.....\n.#...\n.....\n.....", Vec3::ZERO).unwrap();
        // A wide body reaching the pillar at (1, 2) from (3, 2): the pillar is
        // two cells away, so it never takes part.
        let foot = Vec3::new(3.0, 0.5, 2.0);
        let body = Aabb::from_foot(foot, Vec3::new(4.0, 0.5, 0.5));
        assert!(body.overlaps(&grid.cell_bounds(1, 2)));
        let contact = resolve_box(&grid, &body, foot, ContactRule::Blocking);
        assert!(!contact.collided);
    }

    #[test]
    fn foot_on_cell_top_is_ground_contact() {
        let grid = walled_grid();
        let foot = Vec3::new(4.0, 0.95, 3.0);
        let body = Aabb::from_foot(foot, Vec3::splat(0.5));
        let contact = resolve_box(&grid, &body, foot, ContactRule::GroundAware { tolerance: 0.1 });
        assert!(contact.ground_contact);
        assert!(!contact.collided);

        let blocking = resolve_box(&grid, &body, foot, ContactRule::Blocking);
        assert!(blocking.collided);
    }

    #[test]
    fn leaving_the_map_is_a_collision() {
        let grid = walled_grid();
        let foot = Vec3::new(-2.0, 0.5, 3.0);
        let body = Aabb::from_foot(foot, Vec3::splat(0.5));
        let contact = resolve_box(&grid, &body, foot, ContactRule::GroundAware { tolerance: 0.1 });
        assert_eq!(contact, GridContact { collided: true, ground_contact: false });
    }

    #[test]
    fn sphere_against_grid() {
        let grid = walled_grid();
        assert!(!resolve_sphere(&grid, Vec3::new(3.0, 1.0, 3.0), 0.15));
        assert!(resolve_sphere(&grid, Vec3::new(3.4, 1.0, 3.0), 0.15));
        assert!(resolve_sphere(&grid, Vec3::new(-5.0, 1.0, 3.0), 0.15));
    }
}
