use crate::api::config::ArenaConfig;
use crate::api::types::SessionState;
use crate::components::enemy::Enemy;
use crate::components::player::Player;
use crate::core::grid::TileGrid;
use crate::core::rng::Rng;
use crate::error::ArenaError;
use crate::input::intent::TickInput;
use crate::systems::combat::{self, Impact};
use crate::systems::projectile::BulletPool;
use crate::systems::{enemy, player};

/// All state of one arena session.
///
/// Every system receives the pieces it needs from here by reference; there
/// is no other shared state. The grid and config are fixed once built.
#[derive(Debug, Clone)]
pub struct World {
    config: ArenaConfig,
    grid: TileGrid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: BulletPool,
    rng: Rng,
    session: SessionState,
    tick: u64,
    /// Impacts resolved during the most recent tick.
    impacts: Vec<Impact>,
}

impl World {
    /// Validate `config` and start a session with randomly placed enemies.
    pub fn new(config: ArenaConfig, grid: TileGrid) -> Result<Self, ArenaError> {
        config.validate()?;
        let mut rng = Rng::new(config.seed);
        let enemies = enemy::spawn_enemies(&config, &grid, &mut rng);
        log::info!(
            "arena ready: {}x{} grid, {} solid cells, {} enemies, seed {}",
            grid.width,
            grid.height,
            grid.solid_count(),
            enemies.len(),
            config.seed
        );
        Ok(Self::assemble(config, grid, enemies, rng))
    }

    /// Start a session with a caller-supplied enemy roster instead of
    /// random spawns.
    pub fn with_enemies(config: ArenaConfig, grid: TileGrid, enemies: Vec<Enemy>) -> Result<Self, ArenaError> {
        config.validate()?;
        let rng = Rng::new(config.seed);
        Ok(Self::assemble(config, grid, enemies, rng))
    }

    fn assemble(config: ArenaConfig, grid: TileGrid, enemies: Vec<Enemy>, rng: Rng) -> Self {
        Self {
            player: Player::spawn(&config.player),
            bullets: BulletPool::new(&config.bullet),
            config,
            grid,
            enemies,
            rng,
            session: SessionState::Playing,
            tick: 0,
            impacts: Vec::new(),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Phases run in a fixed order and each sees the results of the ones
    /// before it: player timers, horizontal move, jump, fire, vertical
    /// physics, enemy AI, bullet travel, impacts. Once the player is
    /// defeated the world no longer changes.
    pub fn step(&mut self, input: &TickInput) -> SessionState {
        if self.session.is_over() {
            return self.session;
        }
        self.impacts.clear();

        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };

        player::tick_timers(&mut self.player, dt);
        player::move_horizontal(&mut self.player, &self.grid, input.movement, &self.config);
        if input.jump {
            player::jump(&mut self.player);
        }
        if let Some(aim) = input.fire {
            player::fire(&mut self.player, aim, &mut self.bullets, self.config.eye_height);
        }
        player::integrate_vertical(&mut self.player, &self.grid, &self.config);

        enemy::update_enemies(
            &mut self.enemies,
            &self.player,
            &mut self.bullets,
            &self.grid,
            dt,
            &mut self.rng,
            &self.config,
        );

        self.bullets.advance(dt);
        self.impacts = combat::resolve_hits(
            &mut self.bullets,
            &mut self.player,
            &mut self.enemies,
            &self.grid,
            &self.config,
        );

        self.tick += 1;
        if self.player.vitality.is_depleted() {
            self.session = SessionState::Defeated;
            log::info!("player defeated on tick {}", self.tick);
        }
        self.session
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Ticks simulated so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }
}
