//! Health and the post-hit invulnerability window.

/// Hit-invulnerability state.
///
/// A counted hit opens an `Immune` window; the window closes once its
/// remaining time runs out, and only then can the next hit count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HitWindow {
    #[default]
    Open,
    Immune { remaining: f32 },
}

impl HitWindow {
    pub fn is_immune(&self) -> bool {
        matches!(self, HitWindow::Immune { .. })
    }

    /// Seconds left in the window, 0 when open.
    pub fn remaining(&self) -> f32 {
        match *self {
            HitWindow::Open => 0.0,
            HitWindow::Immune { remaining } => remaining,
        }
    }

    /// Count the window down by `dt`, closing it at or below zero.
    pub fn tick(&mut self, dt: f32) {
        if let HitWindow::Immune { remaining } = *self {
            let left = remaining - dt;
            *self = if left <= 0.0 {
                HitWindow::Open
            } else {
                HitWindow::Immune { remaining: left }
            };
        }
    }
}

/// Health pool plus its hit window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitality {
    health: i32,
    max: i32,
    window: HitWindow,
}

impl Vitality {
    pub fn new(max: i32) -> Self {
        Self {
            health: max,
            max,
            window: HitWindow::Open,
        }
    }

    /// Start below full health. Clamped into `[0, max]`.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.max);
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn window(&self) -> HitWindow {
        self.window
    }

    /// Whether the entity is inside its invulnerability window.
    pub fn is_hit(&self) -> bool {
        self.window.is_immune()
    }

    pub fn hit_timer(&self) -> f32 {
        self.window.remaining()
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0
    }

    pub fn tick(&mut self, dt: f32) {
        self.window.tick(dt);
    }

    /// Apply a hit. Ignored while immune; otherwise removes `damage`
    /// (health never drops below zero) and opens a `window`-second
    /// immunity. A window that is not positive leaves the entity open.
    /// Returns whether the hit counted.
    pub fn take_hit(&mut self, damage: i32, window: f32) -> bool {
        if self.window.is_immune() {
            return false;
        }
        self.health = (self.health - damage).max(0);
        self.window = if window > 0.0 {
            HitWindow::Immune { remaining: window }
        } else {
            HitWindow::Open
        };
        true
    }
}
