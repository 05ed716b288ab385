// Logical actions and the physical inputs that can drive them

use gilrs::Button;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all logical runner actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    Jump,
    Slide,
    /// Fast-fall while airborne
    Down,
    MoveLeft,
    MoveRight,

    // Meta actions
    Pause,
    Restart,
}

/// Screen region a touch landed in, classified by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchZone {
    Upper,
    Lower,
}

/// A physical input that can be bound to one or more actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalInput {
    Keyboard(KeyCode),
    Mouse(MouseButton),
    Touch(TouchZone),
    Gamepad(Button),
}

impl PhysicalInput {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }

    pub fn touch(zone: TouchZone) -> Self {
        Self::Touch(zone)
    }

    pub fn pad(button: Button) -> Self {
        Self::Gamepad(button)
    }
}

/// Default bindings. A physical input may appear more than once when it feeds
/// several actions (S slides on the ground and fast-falls in the air).
pub fn default_bindings() -> Vec<(PhysicalInput, Action)> {
    vec![
        // Keyboard
        (PhysicalInput::key(KeyCode::Space), Action::Jump),
        (PhysicalInput::key(KeyCode::KeyW), Action::Jump),
        (PhysicalInput::key(KeyCode::ArrowUp), Action::Jump),
        (PhysicalInput::key(KeyCode::ShiftLeft), Action::Slide),
        (PhysicalInput::key(KeyCode::KeyS), Action::Slide),
        (PhysicalInput::key(KeyCode::KeyS), Action::Down),
        (PhysicalInput::key(KeyCode::ArrowDown), Action::Slide),
        (PhysicalInput::key(KeyCode::ArrowDown), Action::Down),
        (PhysicalInput::key(KeyCode::KeyA), Action::MoveLeft),
        (PhysicalInput::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (PhysicalInput::key(KeyCode::KeyD), Action::MoveRight),
        (PhysicalInput::key(KeyCode::ArrowRight), Action::MoveRight),
        (PhysicalInput::key(KeyCode::Escape), Action::Pause),
        (PhysicalInput::key(KeyCode::KeyR), Action::Restart),
        // Pointer
        (PhysicalInput::mouse(MouseButton::Left), Action::Jump),
        (PhysicalInput::mouse(MouseButton::Right), Action::Slide),
        // Touch
        (PhysicalInput::touch(TouchZone::Upper), Action::Jump),
        (PhysicalInput::touch(TouchZone::Lower), Action::Slide),
        // Gamepad
        (PhysicalInput::pad(Button::South), Action::Jump),
        (PhysicalInput::pad(Button::East), Action::Slide),
        (PhysicalInput::pad(Button::DPadDown), Action::Down),
        (PhysicalInput::pad(Button::DPadLeft), Action::MoveLeft),
        (PhysicalInput::pad(Button::DPadRight), Action::MoveRight),
        (PhysicalInput::pad(Button::Start), Action::Pause),
        (PhysicalInput::pad(Button::Select), Action::Restart),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_physical_input_creation() {
        assert_eq!(
            PhysicalInput::key(KeyCode::Space),
            PhysicalInput::Keyboard(KeyCode::Space)
        );
        assert_eq!(
            PhysicalInput::touch(TouchZone::Lower),
            PhysicalInput::Touch(TouchZone::Lower)
        );
        assert_eq!(
            PhysicalInput::pad(Button::South),
            PhysicalInput::Gamepad(Button::South)
        );
    }

    #[test]
    fn test_every_runner_action_is_bound() {
        let bound: HashSet<Action> = default_bindings().into_iter().map(|(_, a)| a).collect();
        for action in [
            Action::Jump,
            Action::Slide,
            Action::Down,
            Action::MoveLeft,
            Action::MoveRight,
        ] {
            assert!(bound.contains(&action), "{:?} has no default binding", action);
        }
    }

    #[test]
    fn test_jump_reachable_from_every_device() {
        let jump_sources: Vec<PhysicalInput> = default_bindings()
            .into_iter()
            .filter(|(_, a)| *a == Action::Jump)
            .map(|(s, _)| s)
            .collect();

        assert!(jump_sources.iter().any(|s| matches!(s, PhysicalInput::Keyboard(_))));
        assert!(jump_sources.iter().any(|s| matches!(s, PhysicalInput::Mouse(_))));
        assert!(jump_sources.iter().any(|s| matches!(s, PhysicalInput::Touch(_))));
        assert!(jump_sources.iter().any(|s| matches!(s, PhysicalInput::Gamepad(_))));
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let mut seen = HashSet::new();
        for pair in default_bindings() {
            assert!(seen.insert(pair), "Duplicate binding {:?}", pair);
        }
    }
}
