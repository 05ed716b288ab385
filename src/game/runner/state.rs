// Runner movement state and its derived phase

/// Everything the controller tracks between ticks.
///
/// Every timer is clamped at zero. `sliding` implies `slide_timer > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub grounded: bool,
    pub sliding: bool,
    pub jump_held: bool,
    pub jumps_remaining: u32,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    pub slide_buffer_timer: f32,
    pub slide_timer: f32,
    pub variable_jump_timer: f32,
    pub dash_cooldown_timer: f32,
    /// Ground contact is ignored until this runs out
    pub ground_lockout_timer: f32,
    pub air_dive_pending: bool,
}

impl MovementState {
    /// Standing on the ground, nothing buffered
    pub fn grounded(base_air_jumps: u32, coyote_time: f32) -> Self {
        Self {
            grounded: true,
            sliding: false,
            jump_held: false,
            jumps_remaining: base_air_jumps,
            coyote_timer: coyote_time,
            jump_buffer_timer: 0.0,
            slide_buffer_timer: 0.0,
            slide_timer: 0.0,
            variable_jump_timer: 0.0,
            dash_cooldown_timer: 0.0,
            ground_lockout_timer: 0.0,
            air_dive_pending: false,
        }
    }

    /// Whether every timer is non-negative and the slide invariant holds
    pub fn is_consistent(&self) -> bool {
        let timers = [
            self.coyote_timer,
            self.jump_buffer_timer,
            self.slide_buffer_timer,
            self.slide_timer,
            self.variable_jump_timer,
            self.dash_cooldown_timer,
            self.ground_lockout_timer,
        ];
        timers.iter().all(|t| *t >= 0.0) && (!self.sliding || self.slide_timer > 0.0)
    }
}

/// Coarse view of what the runner is doing, for animation and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementPhase {
    /// On the ground
    Running,
    /// On the ground with the short collider
    Sliding,
    /// In the air, moving against gravity
    Rising,
    /// In the air, moving with gravity
    Falling,
    /// Falling while holding down
    FastFalling,
    /// In the air with the dash cooldown running
    Dashing,
    /// Run is over
    Dead,
}

impl Default for MovementPhase {
    fn default() -> Self {
        Self::Running
    }
}

impl MovementPhase {
    /// Derive the phase from raw state. `along_gravity` is velocity projected on
    /// the current gravity direction (positive = falling).
    pub fn from_state(
        state: &MovementState,
        along_gravity: f32,
        fast_fall_held: bool,
        game_over: bool,
    ) -> Self {
        if game_over {
            Self::Dead
        } else if state.grounded {
            if state.sliding {
                Self::Sliding
            } else {
                Self::Running
            }
        } else if state.dash_cooldown_timer > 0.0 {
            Self::Dashing
        } else if along_gravity > 0.0 {
            if fast_fall_held {
                Self::FastFalling
            } else {
                Self::Falling
            }
        } else {
            Self::Rising
        }
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Running | Self::Sliding)
    }

    pub fn is_airborne(&self) -> bool {
        matches!(
            self,
            Self::Rising | Self::Falling | Self::FastFalling | Self::Dashing
        )
    }

    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Running => "run",
            Self::Sliding => "slide",
            Self::Rising => "jump",
            Self::Falling => "fall",
            Self::FastFalling => "fast_fall",
            Self::Dashing => "air_dash",
            Self::Dead => "dead",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airborne() -> MovementState {
        MovementState {
            grounded: false,
            ..MovementState::grounded(1, 0.1)
        }
    }

    #[test]
    fn test_initial_state() {
        let state = MovementState::grounded(1, 0.1);
        assert!(state.grounded);
        assert!(!state.sliding);
        assert_eq!(state.jumps_remaining, 1);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_inconsistent_slide_detected() {
        let state = MovementState {
            sliding: true,
            slide_timer: 0.0,
            ..MovementState::grounded(1, 0.1)
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_grounded_phases() {
        let mut state = MovementState::grounded(1, 0.1);
        assert_eq!(MovementPhase::from_state(&state, 0.0, false, false), MovementPhase::Running);

        state.sliding = true;
        state.slide_timer = 0.3;
        assert_eq!(MovementPhase::from_state(&state, 0.0, false, false), MovementPhase::Sliding);
        assert!(MovementPhase::Sliding.is_grounded());
    }

    #[test]
    fn test_airborne_phases() {
        let state = airborne();
        assert_eq!(MovementPhase::from_state(&state, -3.0, false, false), MovementPhase::Rising);
        assert_eq!(MovementPhase::from_state(&state, 3.0, false, false), MovementPhase::Falling);
        assert_eq!(MovementPhase::from_state(&state, 3.0, true, false), MovementPhase::FastFalling);
    }

    #[test]
    fn test_dashing_phase() {
        let state = MovementState {
            dash_cooldown_timer: 0.4,
            ..airborne()
        };
        assert_eq!(MovementPhase::from_state(&state, 3.0, true, false), MovementPhase::Dashing);
        assert!(MovementPhase::Dashing.is_airborne());
    }

    #[test]
    fn test_dead_wins() {
        let state = MovementState::grounded(1, 0.1);
        assert_eq!(MovementPhase::from_state(&state, 0.0, false, true), MovementPhase::Dead);
        assert!(!MovementPhase::Dead.is_grounded());
        assert!(!MovementPhase::Dead.is_airborne());
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(MovementPhase::Running.animation_name(), "run");
        assert_eq!(MovementPhase::Sliding.animation_name(), "slide");
        assert_eq!(MovementPhase::FastFalling.animation_name(), "fast_fall");
    }
}
