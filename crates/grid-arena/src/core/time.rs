/// Default cap on ticks run for a single frame.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
///
/// Simulation motion is expressed per tick, so gameplay speed only stays
/// stable when ticks run at a constant rate. Hosts with a variable frame
/// rate feed frame time in here and run the returned number of ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Change how many ticks a single frame may run.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// Time beyond `max_steps` ticks is discarded instead of carried over,
    /// so a long stall does not trigger a burst of catch-up ticks.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let steps = (self.accumulator / self.dt) as u32;
        if steps > self.max_steps {
            log::warn!(
                "frame took {:.3}s, dropping {:.3}s of simulation time",
                frame_dt,
                self.accumulator - self.dt * self.max_steps as f32
            );
            self.accumulator = 0.0;
            return self.max_steps;
        }
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
