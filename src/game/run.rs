// Run lifecycle and ambient gravity owned by the host simulation

use glam::Vec2;
use log::info;

/// What the controller reads from the surrounding run each tick
pub trait RunContext {
    /// The controller performs no state updates while this is false
    fn is_run_active(&self) -> bool;

    /// Ambient gravity. May change between any two ticks.
    fn gravity(&self) -> Vec2;
}

/// Default ambient gravity (m/s², pointing down)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Host-side run flag and gravity vector
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    active: bool,
    gravity: Vec2,
    runs_started: u32,
}

impl RunState {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            active: false,
            gravity,
            runs_started: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.runs_started += 1;
            info!("Run {} started", self.runs_started);
        }
    }

    pub fn end(&mut self) {
        if self.active {
            self.active = false;
            info!("Run {} ended", self.runs_started);
        }
    }

    /// Gravity-flip effect: invert the ambient gravity
    pub fn flip_gravity(&mut self) {
        self.gravity = -self.gravity;
        info!("Gravity flipped to ({:.2}, {:.2})", self.gravity.x, self.gravity.y);
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl RunContext for RunState {
    fn is_run_active(&self) -> bool {
        self.active
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }
}
