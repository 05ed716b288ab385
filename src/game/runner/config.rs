// Runner tuning - one fixed block of constants, optionally overridden from RON

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Movement tuning for the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // Jumping
    /// Launch velocity applied against gravity
    pub jump_force: f32,
    /// Extra upward acceleration while jump is held inside the variable window
    pub variable_jump_force: f32,
    /// Length of the variable-jump window (seconds)
    pub variable_jump_time: f32,
    /// Grace window after leaving the ground (seconds)
    pub coyote_time: f32,
    /// How long an early jump press is remembered (seconds)
    pub jump_buffer_time: f32,
    /// Air jumps restored on every landing
    pub base_air_jumps: u32,
    /// Ground contact ignored for this long after a jump (seconds)
    pub jump_ground_lockout: f32,

    // Sliding
    pub slide_duration: f32,
    /// How long an airborne slide press is remembered (seconds)
    pub slide_buffer_time: f32,
    /// One-shot push towards the ground on an airborne slide press
    pub air_dive_force: f32,

    // Air dash
    pub dash_force: f32,
    pub dash_cooldown: f32,
    /// Horizontal input magnitude required to dash instead of dive
    pub dash_input_threshold: f32,

    // Gravity shaping
    pub fall_gravity_multiplier: f32,
    pub low_jump_gravity_multiplier: f32,
    pub fast_fall_gravity_multiplier: f32,
    /// Gravity magnitudes below this are treated as zero gravity
    pub gravity_epsilon: f32,

    // Ground probe
    /// Probe length from the body origin along gravity
    pub ground_probe_distance: f32,
}

/// Default movement tuning
pub const BASE_MOVEMENT: MovementConfig = MovementConfig {
    jump_force: 12.0,
    variable_jump_force: 18.0,
    variable_jump_time: 0.2,
    coyote_time: 0.1,
    jump_buffer_time: 0.1,
    base_air_jumps: 1,
    jump_ground_lockout: 0.08,

    slide_duration: 0.5,
    slide_buffer_time: 0.2,
    air_dive_force: 10.0,

    dash_force: 14.0,
    dash_cooldown: 0.5,
    dash_input_threshold: 0.1,

    fall_gravity_multiplier: 2.5,
    low_jump_gravity_multiplier: 2.0,
    fast_fall_gravity_multiplier: 1.8,
    gravity_epsilon: 1e-4,

    // Runner is 2 units tall; reach just past the feet
    ground_probe_distance: 1.1,
};

impl Default for MovementConfig {
    fn default() -> Self {
        BASE_MOVEMENT
    }
}

impl MovementConfig {
    pub fn standard() -> Self {
        BASE_MOVEMENT
    }

    /// Reject values that would break timer or gravity invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("jump_force", self.jump_force),
            ("variable_jump_force", self.variable_jump_force),
            ("variable_jump_time", self.variable_jump_time),
            ("coyote_time", self.coyote_time),
            ("jump_buffer_time", self.jump_buffer_time),
            ("jump_ground_lockout", self.jump_ground_lockout),
            ("slide_duration", self.slide_duration),
            ("slide_buffer_time", self.slide_buffer_time),
            ("air_dive_force", self.air_dive_force),
            ("dash_force", self.dash_force),
            ("dash_cooldown", self.dash_cooldown),
            ("dash_input_threshold", self.dash_input_threshold),
            ("ground_probe_distance", self.ground_probe_distance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite value >= 0, got {}", value),
                });
            }
        }

        let positive = [
            ("fall_gravity_multiplier", self.fall_gravity_multiplier),
            ("low_jump_gravity_multiplier", self.low_jump_gravity_multiplier),
            ("fast_fall_gravity_multiplier", self.fast_fall_gravity_multiplier),
            ("gravity_epsilon", self.gravity_epsilon),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite value > 0, got {}", value),
                });
            }
        }

        if self.slide_duration == 0.0 {
            return Err(ConfigError::Invalid {
                field: "slide_duration",
                reason: "a slide must last longer than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Haptic strengths and lengths for presentation requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub jump_rumble: (f32, f32),
    pub dash_rumble: (f32, f32),
    pub shield_rumble: (f32, f32),
    pub hit_rumble: (f32, f32),
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            jump_rumble: (0.15, 0.05),
            dash_rumble: (0.35, 0.08),
            shield_rumble: (0.6, 0.2),
            hit_rumble: (1.0, 0.4),
        }
    }
}

/// Everything tunable about the runner, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub movement: MovementConfig,
    pub feedback: FeedbackConfig,
}

impl RunnerConfig {
    /// Parse and validate a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: RunnerConfig = ron::from_str(source)?;
        config.movement.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }
}
