// Game layer: run lifecycle and the runner character controller

pub mod run;
pub mod runner;
