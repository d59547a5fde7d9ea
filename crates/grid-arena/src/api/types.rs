use serde::{Deserialize, Serialize};

/// Sprite facing of the player.
/// Discriminants match the row order of the player sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down = 0,
    Right = 1,
    Up = 2,
    Left = 3,
}

impl Facing {
    /// Wire value used by the snapshot bridge.
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// Who fired a bullet. Decides which targets the bullet can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Owner {
    Player,
    #[default]
    Enemy,
}

/// Session-level state visible to the presentation layer.
///
/// Pausing is owned by the host; the core only knows whether the player
/// is still standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Playing,
    /// The player reached zero health. Further ticks are ignored.
    Defeated,
}

impl SessionState {
    pub fn is_over(self) -> bool {
        self == SessionState::Defeated
    }
}
