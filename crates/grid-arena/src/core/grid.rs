//! Occupancy grid for the arena floor plan.
//!
//! The grid is decoded once when a session starts and never changes
//! afterwards. Cell `(cx, cz)` is a unit cube centred on
//! `origin + (cx, 0.5, cz)`, so it spans `[cx - 0.5, cx + 0.5]` on x,
//! `[0, 1]` on y and `[cz - 0.5, cz + 0.5]` on z, all offset by the origin.

use glam::{Vec2, Vec3};

use crate::core::collision::Aabb;
use crate::error::ArenaError;

/// A pixel is a wall when every colour channel exceeds this value.
pub const WALL_THRESHOLD: u8 = 50;

/// World position of cell `(0, 0)` in the stock arena.
pub const DEFAULT_MAP_ORIGIN: Vec3 = Vec3::new(-16.0, 0.0, -8.0);

/// Height of every solid cell.
pub const CELL_HEIGHT: f32 = 1.0;

/// Read-only occupancy grid.
///
/// Cells are stored in row-major order: index = z * width + x
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    /// Width of the grid in cells (x axis).
    pub width: u32,
    /// Height of the grid in cells (z axis).
    pub height: u32,
    /// World position of cell (0, 0).
    pub origin: Vec3,
    cells: Vec<bool>,
}

impl TileGrid {
    /// Build a grid from a row-major boolean bitmap (`true` = solid).
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>, origin: Vec3) -> Result<Self, ArenaError> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(ArenaError::EmptyGrid);
        }
        if cells.len() != expected {
            return Err(ArenaError::GridSize {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            origin,
            cells,
        })
    }

    /// Decode an RGBA8 image into a grid.
    /// A pixel is solid when r, g and b all exceed [`WALL_THRESHOLD`]; alpha is ignored.
    pub fn from_rgba(width: u32, height: u32, pixels: &[u8], origin: Vec3) -> Result<Self, ArenaError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ArenaError::GridSize {
                expected,
                actual: pixels.len(),
            });
        }
        let cells = pixels
            .chunks_exact(4)
            .map(|px| px[..3].iter().all(|&channel| channel > WALL_THRESHOLD))
            .collect();
        Self::from_cells(width, height, cells, origin)
    }

    /// Parse an ASCII floor plan: one line per z row, `#` solid, `.` open.
    /// Leading and trailing whitespace on each line is ignored, as are blank lines.
    pub fn from_ascii(text: &str, origin: Vec3) -> Result<Self, ArenaError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(ArenaError::RaggedRow {
                    row,
                    width: row_width,
                    expected: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    _ => return Err(ArenaError::BadMapChar { ch, row, col }),
                }
            }
        }

        let width = u32::try_from(width).map_err(|_| ArenaError::GridSize {
            expected: u32::MAX as usize,
            actual: width,
        })?;
        let height = u32::try_from(rows.len()).map_err(|_| ArenaError::GridSize {
            expected: u32::MAX as usize,
            actual: rows.len(),
        })?;
        Self::from_cells(width, height, cells, origin)
    }

    /// Whether cell `(cx, cz)` is a wall. Cells outside the grid are open.
    pub fn is_solid(&self, cx: i32, cz: i32) -> bool {
        let (Ok(x), Ok(z)) = (u32::try_from(cx), u32::try_from(cz)) else {
            return false;
        };
        if x >= self.width || z >= self.height {
            return false;
        }
        self.cells[(z * self.width + x) as usize]
    }

    /// World-space box occupied by cell `(cx, cz)`.
    pub fn cell_bounds(&self, cx: i32, cz: i32) -> Aabb {
        let min = self.origin + Vec3::new(cx as f32 - 0.5, 0.0, cz as f32 - 0.5);
        Aabb::new(min, min + Vec3::new(1.0, CELL_HEIGHT, 1.0))
    }

    /// Cell index containing a world position: `floor(world - origin)`.
    pub fn cell_of(&self, world: Vec3) -> (i32, i32) {
        let local = world - self.origin;
        (local.x.floor() as i32, local.z.floor() as i32)
    }

    /// Overall box of the map volume, used for containment checks.
    pub fn bounds(&self) -> Aabb {
        let min = self.origin + Vec3::new(-0.5, 0.0, -0.5);
        let extent = Vec3::new(self.width as f32, CELL_HEIGHT, self.height as f32);
        Aabb::new(min, min + extent)
    }

    /// Boxes of the solid cells in the 3×3 block around `world`'s cell,
    /// scanned row by row.
    pub fn solid_neighbours(&self, world: Vec3) -> impl Iterator<Item = Aabb> + '_ {
        let (cx, cz) = self.cell_of(world);
        (-1..=1)
            .flat_map(move |dz| (-1..=1).map(move |dx| (cx + dx, cz + dz)))
            .filter(|&(x, z)| self.is_solid(x, z))
            .map(|(x, z)| self.cell_bounds(x, z))
    }

    /// Normalised minimap coordinates of a world position.
    pub fn minimap_uv(&self, world: Vec3) -> Vec2 {
        let local = world - self.origin;
        Vec2::new(local.x / self.width as f32, local.z / self.height as f32)
    }

    /// Count of solid cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Total capacity in cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
        #####
        #...#
        #.#.#
        #...#
        #####
    ";

    #[test]
    fn ascii_room_parses() {
        let grid = TileGrid::from_ascii(ROOM, Vec3::ZERO).unwrap();
        assert_eq!(grid.width, 5);
        assert_eq!(grid.height, 5);
        assert_eq!(grid.capacity(), 25);
        assert_eq!(grid.solid_count(), 17);
        assert!(grid.is_solid(0, 0));
        assert!(!grid.is_solid(1, 1));
        assert!(grid.is_solid(2, 2));
    }

    #[test]
    fn out_of_range_cells_are_open() {
        let grid = TileGrid::from_ascii(ROOM, Vec3::ZERO).unwrap();
        assert!(!grid.is_solid(-1, 0));
        assert!(!grid.is_solid(0, -1));
        assert!(!grid.is_solid(5, 0));
        assert!(!grid.is_solid(0, 5));
        assert!(!grid.is_solid(i32::MIN, i32::MAX));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TileGrid::from_ascii("###\n##", Vec3::ZERO).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::RaggedRow { row: 1, width: 2, expected: 3 }
        ));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let err = TileGrid::from_ascii("#.x", Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ArenaError::BadMapChar { ch: 'x', row: 0, col: 2 }));
    }

    #[test]
    fn empty_grids_are_rejected() {
        assert!(matches!(
            TileGrid::from_ascii("\n  \n", Vec3::ZERO),
            Err(ArenaError::EmptyGrid)
        ));
        assert!(matches!(
            TileGrid::from_cells(0, 4, Vec::new(), Vec3::ZERO),
            Err(ArenaError::EmptyGrid)
        ));
    }

    #[test]
    fn cell_buffer_must_match_dimensions() {
        let err = TileGrid::from_cells(2, 2, vec![false; 3], Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ArenaError::GridSize { expected: 4, actual: 3 }));
    }

    #[test]
    fn rgba_uses_the_wall_threshold() {
        #[rustfmt::skip]
        let pixels = [
            255, 255, 255, 255, // white wall
            51, 51, 51, 255,    // just above threshold
            50, 255, 255, 255,  // one channel at threshold: open
            0, 0, 0, 0,         // black floor
        ];
        let grid = TileGrid::from_rgba(2, 2, &pixels, Vec3::ZERO).unwrap();
        assert!(grid.is_solid(0, 0));
        assert!(grid.is_solid(1, 0));
        assert!(!grid.is_solid(0, 1));
        assert!(!grid.is_solid(1, 1));
    }

    #[test]
    fn rgba_length_is_checked() {
        let err = TileGrid::from_rgba(2, 2, &[0; 12], Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ArenaError::GridSize { expected: 16, actual: 12 }));
    }

    #[test]
    fn cell_bounds_follow_origin() {
        let grid = TileGrid::from_ascii(ROOM, DEFAULT_MAP_ORIGIN).unwrap();
        let b = grid.cell_bounds(2, 3);
        assert_eq!(b.min, Vec3::new(-14.5, 0.0, -5.5));
        assert_eq!(b.max, Vec3::new(-13.5, 1.0, -4.5));
    }

    #[test]
    fn cell_of_floors_local_coordinates() {
        let grid = TileGrid::from_ascii(ROOM, DEFAULT_MAP_ORIGIN).unwrap();
        assert_eq!(grid.cell_of(Vec3::new(-16.0, 0.5, -8.0)), (0, 0));
        assert_eq!(grid.cell_of(Vec3::new(-13.25, 0.5, -5.75)), (2, 2));
        assert_eq!(grid.cell_of(Vec3::new(-16.25, 0.5, -8.0)), (-1, 0));
    }

    #[test]
    fn map_bounds_cover_every_cell() {
        let grid = TileGrid::from_ascii(ROOM, Vec3::ZERO).unwrap();
        let b = grid.bounds();
        assert_eq!(b.min, Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(b.max, Vec3::new(4.5, 1.0, 4.5));
    }

    #[test]
    fn neighbourhood_only_yields_solid_cells() {
        let grid = TileGrid::from_ascii(ROOM, Vec3::ZERO).unwrap();
        // Centre cell (1, 1): walls at row 0, column 0 and the pillar at (2, 2).
        let cells: Vec<Aabb> = grid.solid_neighbours(Vec3::new(1.0, 0.5, 1.0)).collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.contains(&grid.cell_bounds(2, 2)));
        assert!(!cells.contains(&grid.cell_bounds(1, 1)));
    }

    #[test]
    fn minimap_uv_normalises_by_grid_size() {
        let grid = TileGrid::from_ascii(ROOM, DEFAULT_MAP_ORIGIN).unwrap();
        let uv = grid.minimap_uv(Vec3::new(-13.5, 0.5, -5.5));
        assert_eq!(uv, Vec2::new(0.5, 0.5));
    }
}
