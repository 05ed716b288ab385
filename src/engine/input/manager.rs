// Input manager - routes raw device events into logical runner input

use super::action::{Action, PhysicalInput, TouchZone};
use super::config::InputConfig;
use super::player::PlayerInput;
use gilrs::{Axis, Button, EventType};
use log::info;
use winit::event::{ElementState, KeyEvent, MouseButton, TouchPhase};
use winit::keyboard::PhysicalKey;

/// Routes keyboard, pointer, touch and gamepad events through the binding table
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Key repeats are not new presses
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.route(PhysicalInput::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.route(PhysicalInput::mouse(button), state);
    }

    /// Process a touch that the host already classified into a screen zone
    pub fn process_touch(&mut self, zone: TouchZone, phase: TouchPhase) {
        let state = match phase {
            TouchPhase::Started => ElementState::Pressed,
            TouchPhase::Ended | TouchPhase::Cancelled => ElementState::Released,
            TouchPhase::Moved => return,
        };
        self.route(PhysicalInput::touch(zone), state);
    }

    /// Process a gamepad event from gilrs
    pub fn process_gamepad_event(&mut self, event: &EventType) {
        match *event {
            EventType::ButtonPressed(button, _) => {
                self.process_gamepad_button(button, ElementState::Pressed);
            }
            EventType::ButtonReleased(button, _) => {
                self.process_gamepad_button(button, ElementState::Released);
            }
            EventType::AxisChanged(axis, value, _) => self.process_gamepad_axis(axis, value),
            EventType::Connected => info!("Gamepad connected"),
            EventType::Disconnected => {
                // Whatever the pad was holding would otherwise stay stuck
                info!("Gamepad disconnected");
                self.player.release_gamepad();
            }
            _ => {}
        }
    }

    /// Process a gamepad button change
    pub fn process_gamepad_button(&mut self, button: Button, state: ElementState) {
        self.route(PhysicalInput::pad(button), state);
    }

    /// Process a gamepad axis change. Only the left stick's X axis steers.
    pub fn process_gamepad_axis(&mut self, axis: Axis, value: f32) {
        if axis != Axis::LeftStickX {
            return;
        }
        self.set_horizontal_axis(value);
    }

    /// Set the analog horizontal axis (stick or tilt)
    pub fn set_horizontal_axis(&mut self, value: f32) {
        self.player.set_axis(value);
    }

    fn route(&mut self, source: PhysicalInput, state: ElementState) {
        for &action in self.config.actions_for(source) {
            match state {
                ElementState::Pressed => self.player.press(action, source),
                ElementState::Released => self.player.release(action, source),
            }
        }
    }

    /// Clear per-tick edges. Call once per simulation tick, after the controller ran.
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Logical input for the current tick
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Remap bindings; held state is dropped so no source stays stuck
    pub fn config_mut(&mut self) -> &mut InputConfig {
        self.player.reset();
        &mut self.config
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::source::InputSource;

    #[test]
    fn test_touch_routes_to_jump_and_slide() {
        let mut manager = InputManager::default();

        manager.process_touch(TouchZone::Upper, TouchPhase::Started);
        assert!(manager.player().jump_pressed());

        manager.process_touch(TouchZone::Lower, TouchPhase::Started);
        assert!(manager.player().slide_pressed());

        manager.update();
        manager.process_touch(TouchZone::Upper, TouchPhase::Moved);
        assert!(manager.player().jump_held());

        manager.process_touch(TouchZone::Upper, TouchPhase::Cancelled);
        assert!(manager.player().jump_released());
    }

    #[test]
    fn test_mouse_and_gamepad_or_together() {
        let mut manager = InputManager::default();

        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.process_gamepad_button(Button::South, ElementState::Pressed);
        manager.update();

        manager.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(manager.player().jump_held());
        assert!(!manager.player().jump_released());

        manager.process_gamepad_button(Button::South, ElementState::Released);
        assert!(!manager.player().jump_held());
        assert!(manager.player().jump_released());
    }

    #[test]
    fn test_one_source_drives_slide_and_down() {
        let mut config = InputConfig::new();
        config.bind(PhysicalInput::pad(Button::East), Action::Slide);
        config.bind(PhysicalInput::pad(Button::East), Action::Down);
        let mut manager = InputManager::new(config);

        manager.process_gamepad_button(Button::East, ElementState::Pressed);
        assert!(manager.player().slide_pressed());
        assert!(manager.player().down_held());
    }

    #[test]
    fn test_unbound_source_ignored() {
        let mut manager = InputManager::new(InputConfig::new());
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(!manager.player().jump_held());
    }

    #[test]
    fn test_update_clears_edges() {
        let mut manager = InputManager::default();
        manager.process_gamepad_button(Button::Start, ElementState::Pressed);
        assert!(manager.just_pressed(Action::Pause));

        manager.update();
        assert!(!manager.just_pressed(Action::Pause));
    }

    #[test]
    fn test_remap_drops_held_state() {
        let mut manager = InputManager::default();
        manager.process_gamepad_button(Button::South, ElementState::Pressed);
        manager.config_mut().unbind_action(Action::Jump);

        assert!(!manager.player().jump_held());
        assert!(!manager.config().has_binding(Action::Jump));
    }

    #[test]
    fn test_axis_passthrough() {
        let mut manager = InputManager::default();
        manager.set_horizontal_axis(-0.5);
        assert_eq!(manager.player().horizontal(), -0.5);
    }

    #[test]
    fn test_left_stick_steers_with_deadzone() {
        let mut manager = InputManager::default();

        manager.process_gamepad_axis(Axis::LeftStickX, 0.8);
        assert_eq!(manager.player().horizontal(), 0.8);

        manager.process_gamepad_axis(Axis::LeftStickX, -0.03);
        assert_eq!(manager.player().horizontal(), 0.0);

        // Other axes never steer
        manager.process_gamepad_axis(Axis::LeftStickY, 1.0);
        manager.process_gamepad_axis(Axis::RightStickX, 1.0);
        assert_eq!(manager.player().horizontal(), 0.0);
    }

    #[test]
    fn test_dpad_steers_over_stick() {
        let mut manager = InputManager::default();
        manager.process_gamepad_axis(Axis::LeftStickX, 0.6);
        manager.process_gamepad_button(Button::DPadLeft, ElementState::Pressed);
        assert_eq!(manager.player().horizontal(), -1.0);

        manager.process_gamepad_button(Button::DPadLeft, ElementState::Released);
        assert_eq!(manager.player().horizontal(), 0.6);
    }

    #[test]
    fn test_gamepad_disconnect_releases_its_buttons() {
        let mut manager = InputManager::default();
        manager.process_gamepad_button(Button::South, ElementState::Pressed);
        manager.process_gamepad_button(Button::East, ElementState::Pressed);
        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        manager.process_gamepad_event(&EventType::Connected);
        assert!(manager.player().jump_held());
        manager.update();

        manager.process_gamepad_event(&EventType::Disconnected);
        assert!(!manager.player().jump_held());
        assert!(manager.player().jump_released());
        // The mouse still holds slide
        assert!(manager.player().slide_held());
    }
}
