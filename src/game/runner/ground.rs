// Ground contact probe

use glam::Vec2;

use crate::engine::physics::MotionBody;

/// Casts a short probe from the body along gravity against ground geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    probe_distance: f32,
}

impl GroundSensor {
    pub fn new(probe_distance: f32) -> Self {
        Self {
            probe_distance: probe_distance.max(0.0),
        }
    }

    pub fn probe_distance(&self) -> f32 {
        self.probe_distance
    }

    /// Single source of truth for "grounded" this tick. `gravity_dir` must be a
    /// unit vector; no state is kept between queries.
    pub fn query<B: MotionBody + ?Sized>(&self, body: &B, position: Vec2, gravity_dir: Vec2) -> bool {
        body.cast_ground(position, gravity_dir, self.probe_distance)
    }
}
