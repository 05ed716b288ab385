// Runner movement controller and its building blocks

pub mod abilities;
pub mod config;
pub mod controller;
pub mod events;
pub mod gravity;
pub mod ground;
pub mod state;

pub use abilities::{AbilityKind, AbilityState};
pub use config::{FeedbackConfig, MovementConfig, RunnerConfig, BASE_MOVEMENT};
pub use controller::{HitOutcome, MovementController};
pub use events::{anim, Animator, AudioSink, ControllerEvent, HapticSink, Presentation, SoundId};
pub use gravity::GravityModel;
pub use ground::GroundSensor;
pub use state::{MovementPhase, MovementState};

/// Errors surfaced by controller operations
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Invalid {ability:?} duration: {duration} (must be > 0)")]
    InvalidDuration { ability: AbilityKind, duration: f32 },

    #[error("Cannot activate {ability:?}: run is not active")]
    RunInactive { ability: AbilityKind },
}

/// Runner configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_error_display() {
        let err = ControllerError::InvalidDuration {
            ability: AbilityKind::Shield,
            duration: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid Shield duration: -1 (must be > 0)");

        let err = ControllerError::RunInactive {
            ability: AbilityKind::ExtraAirJump,
        };
        assert_eq!(
            err.to_string(),
            "Cannot activate ExtraAirJump: run is not active"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            field: "coyote_time",
            reason: "must be a finite value >= 0, got -0.1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config value `coyote_time`: must be a finite value >= 0, got -0.1"
        );
    }
}
