pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod error;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::config::{ArenaConfig, PlayerConfig, EnemyConfig, BulletConfig};
pub use api::types::{Facing, Owner, SessionState};
pub use error::ArenaError;
pub use crate::core::collision::{Aabb, ContactRule, GridContact, box_vs_box, sphere_vs_box, resolve_box, resolve_sphere};
pub use crate::core::grid::{TileGrid, DEFAULT_MAP_ORIGIN, WALL_THRESHOLD};
pub use crate::core::rng::Rng;
pub use crate::core::time::FixedTimestep;
pub use crate::core::world::World;
pub use components::entity::Body;
pub use components::health::{HitWindow, Vitality};
pub use components::player::{Player, Stance};
pub use components::enemy::Enemy;
pub use components::bullet::Bullet;
pub use input::intent::{MoveIntent, TickInput};
pub use systems::projectile::BulletPool;
pub use systems::combat::Impact;
pub use bridge::snapshot::{ActorSnapshot, BulletSnapshot, WorldSnapshot};
pub use runner::ArenaRunner;
