// Gravity shaping: heavier falls, snappier short hops, fast-fall

use glam::Vec2;

use crate::core::math::gravity_direction;

use super::config::MovementConfig;

/// Computes the extra velocity change to layer on top of ambient gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityModel {
    pub fall_multiplier: f32,
    pub low_jump_multiplier: f32,
    pub fast_fall_multiplier: f32,
    pub epsilon: f32,
}

impl GravityModel {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            fall_multiplier: config.fall_gravity_multiplier,
            low_jump_multiplier: config.low_jump_gravity_multiplier,
            fast_fall_multiplier: config.fast_fall_gravity_multiplier,
            epsilon: config.gravity_epsilon,
        }
    }

    /// Velocity delta for this tick.
    ///
    /// "Falling" is measured against the gravity vector passed in, never a cached
    /// direction, so a flip between ticks just changes which branch applies.
    /// Fast-fall and low-jump are exclusive: only one branch fires per tick.
    pub fn extra_acceleration(
        &self,
        velocity: Vec2,
        gravity: Vec2,
        jump_held: bool,
        fast_fall_held: bool,
        dt: f32,
    ) -> Vec2 {
        let Some(down) = gravity_direction(gravity, self.epsilon) else {
            return Vec2::ZERO;
        };
        let strength = gravity.length();
        let along = velocity.dot(down);

        let multiplier = if along > 0.0 {
            let fast_fall = if fast_fall_held {
                self.fast_fall_multiplier
            } else {
                1.0
            };
            self.fall_multiplier * fast_fall
        } else if along < 0.0 && !jump_held {
            self.low_jump_multiplier
        } else {
            return Vec2::ZERO;
        };

        down * strength * (multiplier - 1.0) * dt
    }
}

impl Default for GravityModel {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 0.02;
    const G: Vec2 = Vec2::new(0.0, -10.0);

    fn model() -> GravityModel {
        GravityModel {
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            fast_fall_multiplier: 2.0,
            epsilon: 1e-4,
        }
    }

    #[test]
    fn test_falling_gets_heavier() {
        let delta = model().extra_acceleration(Vec2::new(3.0, -4.0), G, false, false, DT);
        // 10 * (2.5 - 1) * 0.02 = 0.3 downward
        assert_abs_diff_eq!(delta.x, 0.0);
        assert_abs_diff_eq!(delta.y, -0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_fast_fall_multiplies() {
        let delta = model().extra_acceleration(Vec2::new(0.0, -4.0), G, false, true, DT);
        // 10 * (2.5 * 2.0 - 1) * 0.02 = 0.8
        assert_abs_diff_eq!(delta.y, -0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_released_jump_cuts_ascent() {
        let delta = model().extra_acceleration(Vec2::new(0.0, 5.0), G, false, false, DT);
        // 10 * (2.0 - 1) * 0.02 = 0.2 downward
        assert_abs_diff_eq!(delta.y, -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_held_jump_rises_normally() {
        let delta = model().extra_acceleration(Vec2::new(0.0, 5.0), G, true, false, DT);
        assert_eq!(delta, Vec2::ZERO);
    }

    #[test]
    fn test_fast_fall_ignored_while_rising() {
        // Only one branch per tick: rising + released uses low-jump, not fast-fall
        let delta = model().extra_acceleration(Vec2::new(0.0, 5.0), G, false, true, DT);
        assert_abs_diff_eq!(delta.y, -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_no_vertical_motion_no_extra() {
        let delta = model().extra_acceleration(Vec2::new(6.0, 0.0), G, false, true, DT);
        assert_eq!(delta, Vec2::ZERO);
    }

    #[test]
    fn test_degenerate_gravity_is_zero() {
        let delta = model().extra_acceleration(Vec2::new(0.0, -4.0), Vec2::new(0.0, 1e-6), false, true, DT);
        assert_eq!(delta, Vec2::ZERO);
        assert!(delta.is_finite());
    }

    #[test]
    fn test_flip_mid_fall_reevaluates_direction() {
        // Moving down, gravity now points up: that is "rising" against the new gravity
        let flipped = Vec2::new(0.0, 10.0);
        let released = model().extra_acceleration(Vec2::new(0.0, -4.0), flipped, false, true, DT);
        assert_abs_diff_eq!(released.y, 0.2, epsilon = 1e-6);

        // Moving up under flipped gravity is falling
        let falling = model().extra_acceleration(Vec2::new(0.0, 4.0), flipped, true, true, DT);
        assert_abs_diff_eq!(falling.y, 0.8, epsilon = 1e-6);
    }
}
