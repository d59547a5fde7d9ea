use crate::api::config::ArenaConfig;
use crate::bridge::snapshot::WorldSnapshot;
use crate::core::grid::TileGrid;
use crate::core::time::FixedTimestep;
use crate::core::world::World;
use crate::error::ArenaError;
use crate::input::intent::TickInput;
use glam::Vec3;

/// Frame driver glue between a host loop and the fixed-tick [`World`].
///
/// The host calls [`ArenaRunner::frame`] once per rendered frame with the
/// real elapsed time. Pausing is the host's business: a paused host simply
/// stops calling `frame`.
pub struct ArenaRunner {
    world: World,
    timestep: FixedTimestep,
    /// Packed snapshot of the last frame, rebuilt after every `frame` call.
    buffer: Vec<f32>,
    /// Edges pressed on frames too short to run a tick.
    pending_jump: bool,
    pending_fire: Option<Vec3>,
}

impl ArenaRunner {
    pub fn new(world: World) -> Self {
        let config = world.config();
        let timestep = FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps);
        let mut runner = Self {
            world,
            timestep,
            buffer: Vec::new(),
            pending_jump: false,
            pending_fire: None,
        };
        runner.rebuild_buffer();
        runner
    }

    /// Build the world from config and grid, then wrap it.
    pub fn from_config(config: ArenaConfig, grid: TileGrid) -> Result<Self, ArenaError> {
        Ok(Self::new(World::new(config, grid)?))
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    ///
    /// Every tick receives the fixed dt. Jump and fire are edges and only
    /// reach the first tick that runs; held movement reaches all of them.
    /// Edges from a frame that runs no tick wait for the next one that does,
    /// and a newer aim point replaces an older one.
    pub fn frame(&mut self, frame_dt: f32, input: &TickInput) -> u32 {
        self.pending_jump |= input.jump;
        if input.fire.is_some() {
            self.pending_fire = input.fire;
        }

        let steps = self.timestep.accumulate(frame_dt);
        let dt = self.timestep.dt();

        for i in 0..steps {
            let mut tick = input.held(dt);
            if i == 0 {
                tick.jump = std::mem::take(&mut self.pending_jump);
                tick.fire = self.pending_fire.take();
            }
            self.world.step(&tick);
        }

        self.rebuild_buffer();
        steps
    }

    fn rebuild_buffer(&mut self) {
        WorldSnapshot::capture(&self.world).write_floats(&mut self.buffer);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world)
    }

    /// Packed snapshot of the last frame.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Interpolation alpha for rendering between ticks.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }
}
