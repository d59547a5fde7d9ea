use glam::Vec3;

use crate::api::types::Facing;

/// Movement requested for one tick: one of eight directions, or none.
/// Down is +z, Right is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveIntent {
    #[default]
    Idle,
    Down,
    DownRight,
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
}

impl MoveIntent {
    /// Map held direction keys to an intent.
    /// Right wins over left and down wins over up when both are held.
    pub fn from_keys(right: bool, left: bool, down: bool, up: bool) -> Self {
        let x = if right {
            1
        } else if left {
            -1
        } else {
            0
        };
        let z = if down {
            1
        } else if up {
            -1
        } else {
            0
        };
        match (x, z) {
            (0, 1) => MoveIntent::Down,
            (1, 1) => MoveIntent::DownRight,
            (1, 0) => MoveIntent::Right,
            (1, -1) => MoveIntent::UpRight,
            (0, -1) => MoveIntent::Up,
            (-1, -1) => MoveIntent::UpLeft,
            (-1, 0) => MoveIntent::Left,
            (-1, 1) => MoveIntent::DownLeft,
            _ => MoveIntent::Idle,
        }
    }

    /// Unit step per active axis (diagonals are not normalised).
    pub fn vector(self) -> Vec3 {
        let (x, z) = match self {
            MoveIntent::Idle => (0.0, 0.0),
            MoveIntent::Down => (0.0, 1.0),
            MoveIntent::DownRight => (1.0, 1.0),
            MoveIntent::Right => (1.0, 0.0),
            MoveIntent::UpRight => (1.0, -1.0),
            MoveIntent::Up => (0.0, -1.0),
            MoveIntent::UpLeft => (-1.0, -1.0),
            MoveIntent::Left => (-1.0, 0.0),
            MoveIntent::DownLeft => (-1.0, 1.0),
        };
        Vec3::new(x, 0.0, z)
    }

    /// Facing shown while moving. Diagonals face along z.
    pub fn facing(self) -> Option<Facing> {
        match self {
            MoveIntent::Idle => None,
            MoveIntent::Down | MoveIntent::DownRight | MoveIntent::DownLeft => Some(Facing::Down),
            MoveIntent::Up | MoveIntent::UpRight | MoveIntent::UpLeft => Some(Facing::Up),
            MoveIntent::Right => Some(Facing::Right),
            MoveIntent::Left => Some(Facing::Left),
        }
    }
}

/// Everything the simulation consumes for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Elapsed time in seconds.
    pub dt: f32,
    pub movement: MoveIntent,
    /// Jump pressed this tick (edge).
    pub jump: bool,
    /// Fire pressed this tick, aimed at a world-space point.
    pub fire: Option<Vec3>,
}

impl TickInput {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_movement(mut self, movement: MoveIntent) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_fire(mut self, aim: Vec3) -> Self {
        self.fire = Some(aim);
        self
    }

    /// The same held state for a follow-up tick: movement stays, edges clear.
    pub fn held(&self, dt: f32) -> Self {
        Self {
            dt,
            movement: self.movement,
            jump: false,
            fire: None,
        }
    }
}
