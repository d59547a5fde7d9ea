use thiserror::Error;

/// Errors raised while assembling an arena.
///
/// Only construction can fail. Once a [`crate::World`] exists, every tick
/// resolves boundary conditions by clamping or ignoring them.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The config document is not valid JSON for [`crate::ArenaConfig`].
    #[error("failed to parse arena config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A config value is out of its physical range.
    #[error("invalid arena config: {0}")]
    InvalidConfig(String),

    /// The occupancy grid has no cells.
    #[error("occupancy grid must have at least one cell")]
    EmptyGrid,

    /// The cell buffer does not match the declared dimensions.
    #[error("occupancy grid expected {expected} entries, got {actual}")]
    GridSize { expected: usize, actual: usize },

    /// An ASCII map row differs in width from the first row.
    #[error("map row {row} is {width} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    /// An ASCII map contains something other than `#` or `.`.
    #[error("unexpected map character {ch:?} at row {row}, column {col}")]
    BadMapChar { ch: char, row: usize, col: usize },
}
