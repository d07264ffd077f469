use std::collections::BTreeMap;

use crate::physics::{ColliderHandle, PhysicsError, PhysicsWorld};
use crate::spatial::{Footprint, Vertex};

/// Physics world that records static loops and dynamic bodies in memory
///
/// Suitable for headless simulation and tests. Creation can be made to fail
/// after a given number of successful calls to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryPhysics {
    colliders: BTreeMap<ColliderHandle, Vec<Vertex>>,
    bodies: Vec<Footprint>,
    next_handle: u64,
    fail_after: Option<usize>,
    created: usize,
    disposed: usize,
}

impl MemoryPhysics {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every creation after the next `successes` calls fail
    pub const fn fail_creation_after(&mut self, successes: usize) {
        self.fail_after = Some(successes);
    }

    /// Stop injecting creation failures
    pub const fn clear_failure(&mut self) {
        self.fail_after = None;
    }

    /// Add a dynamic body occupying `footprint`, returning its index
    pub fn add_body(&mut self, footprint: Footprint) -> usize {
        self.bodies.push(footprint);
        self.bodies.len() - 1
    }

    /// Remove every dynamic body
    pub fn clear_bodies(&mut self) {
        self.bodies.clear();
    }

    /// Vertices of a live collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&[Vertex]> {
        self.colliders.get(&handle).map(Vec::as_slice)
    }

    /// All live colliders in creation order
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &[Vertex])> + '_ {
        self.colliders
            .iter()
            .map(|(&handle, vertices)| (handle, vertices.as_slice()))
    }

    /// Number of live colliders
    pub fn live_count(&self) -> usize {
        self.colliders.len()
    }

    /// Total successful creations so far
    pub const fn created_count(&self) -> usize {
        self.created
    }

    /// Total successful disposals so far
    pub const fn disposed_count(&self) -> usize {
        self.disposed
    }
}

impl PhysicsWorld for MemoryPhysics {
    fn create_closed_loop_collider(
        &mut self,
        vertices: &[Vertex],
    ) -> Result<ColliderHandle, PhysicsError> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(PhysicsError {
                    operation: "create collider",
                    reason: "injected failure".to_string(),
                });
            }
            *remaining -= 1;
        }

        if vertices.len() < 3 {
            return Err(PhysicsError {
                operation: "create collider",
                reason: format!("closed loop needs 3 or more vertices, got {}", vertices.len()),
            });
        }

        let handle = ColliderHandle(self.next_handle);
        self.next_handle += 1;
        self.colliders.insert(handle, vertices.to_vec());
        self.created += 1;
        Ok(handle)
    }

    fn dispose_collider(&mut self, handle: ColliderHandle) -> Result<(), PhysicsError> {
        if self.colliders.remove(&handle).is_none() {
            return Err(PhysicsError {
                operation: "dispose collider",
                reason: format!("unknown handle {handle}"),
            });
        }
        self.disposed += 1;
        Ok(())
    }

    fn is_any_dynamic_entity_overlapping(&self, footprint: &Footprint) -> bool {
        self.bodies.iter().any(|body| body.overlaps(footprint))
    }
}
