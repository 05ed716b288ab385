// Engine modules: simulation loop, input, physics

pub mod game_loop;
pub mod input;
pub mod physics;
