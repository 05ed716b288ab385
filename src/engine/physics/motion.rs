// Engine-agnostic body seam used by the runner controller

use glam::Vec2;

/// Axis-aligned box collider: half extents plus offset from the body origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderShape {
    pub half_extents: Vec2,
    pub offset: Vec2,
}

impl ColliderShape {
    pub fn new(half_extents: Vec2, offset: Vec2) -> Self {
        Self {
            half_extents,
            offset,
        }
    }

    /// Box of `width` x `height` centred on the body origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::new(width / 2.0, height / 2.0), Vec2::ZERO)
    }

    /// Crouched variant: half the extent along `down`, shifted towards `down` by a
    /// quarter of the full extent so the feet stay planted.
    pub fn crouched(&self, down: Vec2) -> Self {
        let vertical = down.x.abs() < down.y.abs();
        let (half_extents, full_height) = if vertical {
            (
                Vec2::new(self.half_extents.x, self.half_extents.y / 2.0),
                self.half_extents.y * 2.0,
            )
        } else {
            (
                Vec2::new(self.half_extents.x / 2.0, self.half_extents.y),
                self.half_extents.x * 2.0,
            )
        };
        Self {
            half_extents,
            offset: self.offset + down * (full_height / 4.0),
        }
    }
}

/// What the controller needs from a physics body.
///
/// Impulses are mass-normalized (a direct velocity change). Any engine that can
/// query contacts, read/write velocity and apply impulses can implement this.
pub trait MotionBody {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    fn apply_impulse(&mut self, delta_v: Vec2) {
        let v = self.velocity();
        self.set_velocity(v + delta_v);
    }

    /// Short probe from `origin` along unit `direction` against ground geometry
    fn cast_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> bool;

    /// Current resizable collider, `None` if the body has none
    fn collider_shape(&self) -> Option<ColliderShape>;

    fn set_collider_shape(&mut self, shape: ColliderShape);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        let shape = ColliderShape::from_size(1.0, 2.0);
        assert_eq!(shape.half_extents, Vec2::new(0.5, 1.0));
        assert_eq!(shape.offset, Vec2::ZERO);
    }

    #[test]
    fn test_crouched_normal_gravity() {
        let shape = ColliderShape::from_size(1.0, 2.0);
        let crouched = shape.crouched(Vec2::NEG_Y);
        assert_eq!(crouched.half_extents, Vec2::new(0.5, 0.5));
        assert_eq!(crouched.offset, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_crouched_flipped_gravity() {
        let shape = ColliderShape::new(Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.25));
        let crouched = shape.crouched(Vec2::Y);
        assert_eq!(crouched.half_extents, Vec2::new(0.5, 0.5));
        assert_eq!(crouched.offset, Vec2::new(0.0, 0.75));
    }
}
