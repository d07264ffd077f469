//! Narrow interface to the external physics engine
//!
//! The boundary code only ever creates and disposes static closed-loop
//! colliders and asks whether a dynamic entity occupies a tile footprint.

use std::fmt;

use crate::spatial::{Footprint, Vertex};

/// In-process physics world backed by plain collections
pub mod memory;

pub use memory::MemoryPhysics;

/// Opaque handle to one static closed-loop collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub u64);

impl fmt::Display for ColliderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}

/// Failure reported by the physics engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicsError {
    /// Operation that failed
    pub operation: &'static str,
    /// Engine-supplied description
    pub reason: String,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.reason)
    }
}

impl std::error::Error for PhysicsError {}

/// Operations the boundary code needs from the physics engine
pub trait PhysicsWorld {
    /// Register a static collider tracing the closed polygon `vertices`
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the shape or runs out of capacity
    fn create_closed_loop_collider(
        &mut self,
        vertices: &[Vertex],
    ) -> std::result::Result<ColliderHandle, PhysicsError>;

    /// Remove a collider previously returned by `create_closed_loop_collider`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown to the engine
    fn dispose_collider(&mut self, handle: ColliderHandle)
    -> std::result::Result<(), PhysicsError>;

    /// Whether any dynamic entity currently overlaps `footprint`
    fn is_any_dynamic_entity_overlapping(&self, footprint: &Footprint) -> bool;
}
