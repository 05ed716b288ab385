use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{
    CollisionEvent as GameCollisionEvent, CollisionEventQueue, CollisionGroups, CollisionTag,
};

/// Physics world that manages the runner's rigid-body simulation
pub struct PhysicsWorld {
    /// Base gravity, kept in sync with the run's ambient gravity by the host
    gravity: Vector<Real>,

    /// Integration parameters, stepped at the fixed simulation rate
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set (unused by the level, required by the pipeline)
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set (unused by the level, required by the pipeline)
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver so a fast fall cannot tunnel through the floor
    ccd_solver: CCDSolver,

    /// Query pipeline for the ground cast, refreshed every step
    query_pipeline: QueryPipeline,

    /// Runner, floor, ceiling and obstacle bodies
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Contact events collected during the last step
    collision_event_queue: CollisionEventQueue,

    /// Gameplay meaning of level colliders
    collider_tags: HashMap<ColliderHandle, CollisionTag>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            collider_tags: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collision_event_queue,
        );
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Add a level collider and remember what touching it means
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
        tag: CollisionTag,
    ) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.collider_tags.insert(handle, tag);
        handle
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    pub fn get_collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collider_set.get_mut(handle)
    }

    pub fn collider_tag(&self, handle: ColliderHandle) -> Option<CollisionTag> {
        self.collider_tags.get(&handle).copied()
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Ground-only probe that ignores `exclude` (the runner's own body)
    pub fn probe_ground(
        &self,
        origin: Vector<Real>,
        direction: Vector<Real>,
        max_distance: Real,
        exclude: RigidBodyHandle,
    ) -> bool {
        let filter = QueryFilter::default()
            .exclude_rigid_body(exclude)
            .groups(CollisionGroups::ground_probe());
        self.raycast(origin, direction, max_distance, true, filter)
            .is_some()
    }

    /// Get all collision events from this step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Tags of everything that started touching `collider` during the last step
    pub fn contacts_started(&self, collider: ColliderHandle) -> Vec<CollisionTag> {
        self.get_collision_events()
            .iter()
            .filter_map(|event| event.started_with(collider))
            .filter_map(|other| self.collider_tag(other))
            .collect()
    }

    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
