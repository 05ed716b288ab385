// Per-tick logical input state for the runner

use super::action::{Action, PhysicalInput};
use super::source::InputSource;
use std::collections::{HashMap, HashSet};

/// Analog values inside this band count as centred
const AXIS_DEAD_ZONE: f32 = 0.05;

/// Logical input state for the runner
///
/// Every action tracks the set of physical inputs currently holding it, so the
/// action stays held until the last of them lets go.
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Physical inputs currently holding each action
    holders: HashMap<Action, HashSet<PhysicalInput>>,

    /// Actions whose logical state went up this tick
    just_pressed: HashSet<Action>,

    /// Actions whose logical state went down this tick
    just_released: HashSet<Action>,

    /// Analog horizontal axis (gamepad stick, tilt, ...)
    axis: f32,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held by any source
    pub fn is_pressed(&self, action: Action) -> bool {
        self.holders
            .get(&action)
            .is_some_and(|sources| !sources.is_empty())
    }

    /// Check if an action went from released to held this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action went from held to released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register a physical input going down for `action`
    pub(crate) fn press(&mut self, action: Action, source: PhysicalInput) {
        let was_held = self.is_pressed(action);
        let sources = self.holders.entry(action).or_default();
        if sources.insert(source) && !was_held {
            self.just_pressed.insert(action);
        }
    }

    /// Register a physical input going up for `action`
    pub(crate) fn release(&mut self, action: Action, source: PhysicalInput) {
        let Some(sources) = self.holders.get_mut(&action) else {
            return;
        };
        if sources.remove(&source) && sources.is_empty() {
            self.just_released.insert(action);
        }
    }

    /// Set the analog horizontal axis
    pub(crate) fn set_axis(&mut self, value: f32) {
        self.axis = if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    /// Clear edge state; call once per tick after the controller has consumed it
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Let go of everything a gamepad holds, with release edges, and center the axis
    pub(crate) fn release_gamepad(&mut self) {
        for (action, sources) in self.holders.iter_mut() {
            let before = sources.len();
            sources.retain(|source| !matches!(source, PhysicalInput::Gamepad(_)));
            if before > 0 && sources.is_empty() {
                self.just_released.insert(*action);
            }
        }
        self.axis = 0.0;
    }

    /// Drop all held sources without emitting release edges
    pub fn reset(&mut self) {
        self.holders.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.axis = 0.0;
    }

    /// Digital left/right wins over the analog axis
    fn horizontal_axis(&self) -> f32 {
        let mut digital = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            digital -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            digital += 1.0;
        }

        if self.is_pressed(Action::MoveLeft) || self.is_pressed(Action::MoveRight) {
            digital
        } else if self.axis.abs() < AXIS_DEAD_ZONE {
            0.0
        } else {
            self.axis
        }
    }
}

impl InputSource for PlayerInput {
    fn jump_pressed(&self) -> bool {
        self.just_pressed(Action::Jump)
    }

    fn jump_held(&self) -> bool {
        self.is_pressed(Action::Jump)
    }

    fn jump_released(&self) -> bool {
        self.just_released(Action::Jump)
    }

    fn slide_pressed(&self) -> bool {
        self.just_pressed(Action::Slide)
    }

    fn slide_held(&self) -> bool {
        self.is_pressed(Action::Slide)
    }

    fn slide_released(&self) -> bool {
        self.just_released(Action::Slide)
    }

    fn down_held(&self) -> bool {
        self.is_pressed(Action::Down)
    }

    fn horizontal(&self) -> f32 {
        self.horizontal_axis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::TouchZone;
    use gilrs::Button;
    use winit::keyboard::KeyCode;

    const SPACE: PhysicalInput = PhysicalInput::Keyboard(KeyCode::Space);
    const PAD_SOUTH: PhysicalInput = PhysicalInput::Gamepad(Button::South);
    const TOUCH_UP: PhysicalInput = PhysicalInput::Touch(TouchZone::Upper);

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        assert!(input.jump_held());
        assert!(input.jump_pressed());
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        input.update();
        input.release(Action::Jump, SPACE);
        assert!(!input.jump_held());
        assert!(input.jump_released());
    }

    #[test]
    fn test_edges_cleared_on_update() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        input.update();
        assert!(input.jump_held());
        assert!(!input.jump_pressed());
    }

    #[test]
    fn test_second_source_does_not_repress() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        input.update();

        input.press(Action::Jump, PAD_SOUTH);
        assert!(!input.jump_pressed(), "already held by keyboard");
        assert!(input.jump_held());
    }

    #[test]
    fn test_release_only_when_last_source_lets_go() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        input.press(Action::Jump, TOUCH_UP);
        input.update();

        input.release(Action::Jump, SPACE);
        assert!(input.jump_held());
        assert!(!input.jump_released());
        input.update();

        input.release(Action::Jump, TOUCH_UP);
        assert!(!input.jump_held());
        assert!(input.jump_released());
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new();
        input.release(Action::Slide, SPACE);
        assert!(!input.slide_released());
    }

    #[test]
    fn test_horizontal_digital_overrides_axis() {
        let mut input = PlayerInput::new();
        input.set_axis(0.4);
        assert_eq!(input.horizontal(), 0.4);

        input.press(Action::MoveLeft, PhysicalInput::Keyboard(KeyCode::KeyA));
        assert_eq!(input.horizontal(), -1.0);

        input.press(Action::MoveRight, PhysicalInput::Keyboard(KeyCode::KeyD));
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_axis_clamped_and_dead_zone() {
        let mut input = PlayerInput::new();
        input.set_axis(3.0);
        assert_eq!(input.horizontal(), 1.0);
        input.set_axis(0.01);
        assert_eq!(input.horizontal(), 0.0);
        input.set_axis(f32::NAN);
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_release_gamepad_keeps_other_devices() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump, SPACE);
        input.press(Action::Jump, PAD_SOUTH);
        input.press(Action::Slide, PhysicalInput::Gamepad(Button::East));
        input.set_axis(0.9);
        input.update();

        input.release_gamepad();
        assert!(input.jump_held());
        assert!(!input.jump_released());
        assert!(!input.slide_held());
        assert!(input.slide_released());
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Slide, SPACE);
        input.set_axis(-0.7);
        input.reset();

        assert!(!input.slide_held());
        assert!(!input.slide_pressed());
        assert_eq!(input.horizontal(), 0.0);
    }
}
