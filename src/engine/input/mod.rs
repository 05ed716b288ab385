// Input handling system
//
// Raw device events (keyboard, mouse, touch, gamepad) are routed through a binding
// table into logical actions. The runner controller only sees the `InputSource`
// trait, so any other producer (replays, AI, tests) can drive it just as well.
//
// ## Architecture
//
// - `action`: Logical actions, physical inputs and default bindings
// - `config`: Binding table and remapping
// - `player`: Per-tick logical state (OR over every held physical input)
// - `source`: The `InputSource` contract and a plain-data `InputFrame`
// - `manager`: Device event entry points
//
// ## Usage Example
//
// ```rust,ignore
// let mut input = InputManager::default();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
// while let Some(event) = gilrs.next_event() {
//     input.process_gamepad_event(&event.event);
// }
//
// // Once per simulation tick
// controller.tick(dt, &run, input.player(), &mut body);
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod source;

// Re-export commonly used types
pub use action::{Action, PhysicalInput, TouchZone};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
pub use source::{InputFrame, InputSource};
