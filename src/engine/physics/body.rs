use super::collision::{CollisionGroups, CollisionTag};
use super::motion::{ColliderShape, MotionBody};
use super::world::PhysicsWorld;
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed).can_sleep(false)
    }

    /// Kinematic body moved by velocity (scrolling level pieces)
    pub fn new_kinematic() -> Self {
        Self::with_type(RigidBodyType::KinematicVelocityBased).can_sleep(false)
    }

    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (runner never tips over)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for box colliders
pub struct ColliderBuilder2D {
    half_extents: Vector<Real>,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    density: Real,
}

impl ColliderBuilder2D {
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            half_extents: vector![half_width, half_height],
            collision_groups: CollisionGroups::Ground,
            is_sensor: false,
            friction: 0.0,
            density: 1.0,
        }
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects collisions but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }


    pub fn build(self) -> Collider {
        ColliderBuilder::cuboid(self.half_extents.x, self.half_extents.y)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(0.0)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// Common rigid body configurations for runner levels
pub mod presets {
    use super::*;

    /// The runner body (dynamic, rotation locked, never sleeps)
    pub fn runner_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// The runner collider (box so it can be halved while sliding)
    pub fn runner_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Player)
            .build()
    }

    pub fn static_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Level piece collider. Ground is solid; everything else is a trigger.
    pub fn level_collider(tag: CollisionTag, width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(tag.group())
            .sensor(tag != CollisionTag::Ground)
            .friction(if tag == CollisionTag::Ground { 0.3 } else { 0.0 })
            .build()
    }
}

/// Adapts a rapier body + box collider to the controller's `MotionBody` seam
pub struct RapierBody<'w> {
    world: &'w mut PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl<'w> RapierBody<'w> {
    pub fn new(world: &'w mut PhysicsWorld, body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            world,
            body,
            collider,
        }
    }
}

impl MotionBody for RapierBody<'_> {
    fn position(&self) -> Vec2 {
        self.world
            .get_rigid_body(self.body)
            .map(|body| {
                let t = body.translation();
                Vec2::new(t.x, t.y)
            })
            .unwrap_or(Vec2::ZERO)
    }

    fn velocity(&self) -> Vec2 {
        self.world
            .get_rigid_body(self.body)
            .map(|body| {
                let v = body.linvel();
                Vec2::new(v.x, v.y)
            })
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(body) = self.world.get_rigid_body_mut(self.body) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn cast_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> bool {
        self.world.probe_ground(
            vector![origin.x, origin.y],
            vector![direction.x, direction.y],
            max_distance,
            self.body,
        )
    }

    fn collider_shape(&self) -> Option<ColliderShape> {
        let collider = self.world.get_collider(self.collider)?;
        let cuboid = collider.shape().as_cuboid()?;
        let offset = collider
            .position_wrt_parent()
            .map(|iso| iso.translation.vector)
            .unwrap_or_else(|| Vector::zeros());

        Some(ColliderShape::new(
            Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y),
            Vec2::new(offset.x, offset.y),
        ))
    }

    fn set_collider_shape(&mut self, shape: ColliderShape) {
        if let Some(collider) = self.world.get_collider_mut(self.collider) {
            collider.set_shape(SharedShape::cuboid(shape.half_extents.x, shape.half_extents.y));
            collider.set_translation_wrt_parent(vector![shape.offset.x, shape.offset.y]);
        }
    }
}
