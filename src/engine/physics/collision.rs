use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// The runner
    Player = 0b0000_0001,

    /// Walkable floor/ceiling segments, the only thing the ground probe sees
    Ground = 0b0000_0010,

    /// Things to jump over or slide under
    Obstacle = 0b0000_0100,

    /// Instant-fail geometry (spikes, pits, lasers)
    Hazard = 0b0000_1000,

    /// Power-ups
    Pickup = 0b0001_0000,

    /// Trigger zones - don't cause physical collision
    Sensor = 0b0010_0000,
}

impl CollisionGroups {
    fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            CollisionGroups::Player => {
                CollisionGroups::Ground.group()
                    | CollisionGroups::Obstacle.group()
                    | CollisionGroups::Hazard.group()
                    | CollisionGroups::Pickup.group()
                    | CollisionGroups::Sensor.group()
            }
            // World geometry only ever reports against the runner
            CollisionGroups::Ground
            | CollisionGroups::Obstacle
            | CollisionGroups::Hazard
            | CollisionGroups::Pickup => CollisionGroups::Player.group(),
            CollisionGroups::Sensor => Group::ALL,
        };

        InteractionGroups::new(self.group(), filter)
    }

    /// Groups for a ground probe cast on behalf of the runner
    pub fn ground_probe() -> InteractionGroups {
        InteractionGroups::new(
            CollisionGroups::Player.group(),
            CollisionGroups::Ground.group(),
        )
    }
}

/// Gameplay meaning of a collider the runner can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionTag {
    Ground,
    Obstacle,
    Hazard,
    Pickup,
}

impl CollisionTag {
    /// Collision group a collider with this tag belongs to
    pub fn group(self) -> CollisionGroups {
        match self {
            CollisionTag::Ground => CollisionGroups::Ground,
            CollisionTag::Obstacle => CollisionGroups::Obstacle,
            CollisionTag::Hazard => CollisionGroups::Hazard,
            CollisionTag::Pickup => CollisionGroups::Pickup,
        }
    }

    /// Whether touching this ends the run (unless shielded)
    pub fn is_lethal(self) -> bool {
        matches!(self, CollisionTag::Obstacle | CollisionTag::Hazard)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// If this is a contact start involving `collider`, the other collider
    pub fn started_with(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider1 == collider => Some(collider2),
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider2 == collider => Some(collider1),
            _ => None,
        }
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        let groups = [
            CollisionGroups::Player,
            CollisionGroups::Ground,
            CollisionGroups::Obstacle,
            CollisionGroups::Hazard,
            CollisionGroups::Pickup,
            CollisionGroups::Sensor,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(*group1 as u32, *group2 as u32, "Groups must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_ground_probe_only_sees_ground() {
        let probe = CollisionGroups::ground_probe();
        assert!(probe.test(CollisionGroups::Ground.to_interaction_groups()));
        assert!(!probe.test(CollisionGroups::Obstacle.to_interaction_groups()));
        assert!(!probe.test(CollisionGroups::Hazard.to_interaction_groups()));
        assert!(!probe.test(CollisionGroups::Player.to_interaction_groups()));
    }

    #[test]
    fn test_lethal_tags() {
        assert!(CollisionTag::Obstacle.is_lethal());
        assert!(CollisionTag::Hazard.is_lethal());
        assert!(!CollisionTag::Ground.is_lethal());
        assert!(!CollisionTag::Pickup.is_lethal());
    }

    #[test]
    fn test_started_with() {
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        let c = ColliderHandle::from_raw_parts(3, 0);

        let started = CollisionEvent::Started {
            collider1: a,
            collider2: b,
        };
        assert_eq!(started.started_with(a), Some(b));
        assert_eq!(started.started_with(b), Some(a));
        assert_eq!(started.started_with(c), None);

        let stopped = CollisionEvent::Stopped {
            collider1: a,
            collider2: b,
        };
        assert_eq!(stopped.started_with(a), None);
    }
}
