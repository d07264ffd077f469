//! Collision boundaries for destructible tile levels
//!
//! Solid tiles are grouped into 4-connected islands, each island's exposed
//! edges are walked into minimal closed loops (outer boundary and holes), and
//! every loop is published to a physics engine as one static collider. As
//! tiles are destroyed and revived, only the groups touching the changed tiles
//! are regrouped and republished.

#![forbid(unsafe_code)]

/// Grouping, boundary extraction, collider binding and incremental updates
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Physics engine interface and an in-memory implementation
pub mod physics;
/// Tile coordinates, the tile arena and the active region
pub mod spatial;

pub use algorithm::coordinator::{CollisionWorld, TickReport};
pub use algorithm::walk::Loop;
pub use io::error::{BoundaryError, Result};
