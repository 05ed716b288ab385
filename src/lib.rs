//! Endless-runner character controller.
//!
//! The [`game::runner::MovementController`] turns per-tick input and a ground query
//! into velocity changes, collider swaps, presentation requests and a game-over
//! signal. The `engine` layer supplies a winit-backed input source, a fixed-step
//! loop and a rapier2d body adapter; the controller itself only talks to traits.

pub mod core;
pub mod engine;
pub mod game;
