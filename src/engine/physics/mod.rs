// Physics system using rapier2d
//
// The runner controller never touches rapier directly: it talks to the
// `MotionBody` seam, and `RapierBody` adapts a rapier body to it.

pub mod body;
mod collision;
mod motion;
mod world;

pub use body::{presets, RapierBody};
pub use collision::{CollisionEvent, CollisionGroups, CollisionTag};
pub use motion::{ColliderShape, MotionBody};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{ColliderHandle, Real, RigidBodyHandle, Vector};
