//! Spatial data structures for the tile level
//!
//! This module contains spatial-related functionality including:
//! - Tile and lattice-vertex coordinates
//! - The tile arena and its grid interface
//! - Active region bounds and the solid-ground predicate

/// Tile, vertex and direction coordinates
pub mod coords;
/// Tile arena and grid interface
pub mod grid;
/// Active region and solid-ground filtering
pub mod region;

pub use coords::{Cell, Direction, Footprint, Vertex};
pub use grid::{BoundingBox, Tile, TileGrid, TileStore};
pub use region::{ActiveRegion, RegionProvider, SolidFilter, Solidity};
