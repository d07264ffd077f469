//! Partition of solid tiles into maximal 4-connected groups
//!
//! Flood fill runs on an explicit stack, so arbitrarily large contiguous
//! regions cannot overflow the call stack. Each tile is visited once. A full
//! pass marks visits in a bitset over the region; a seeded pass uses a hashed
//! set so its cost follows the tiles reached.

use crate::algorithm::cellset::{CellSet, SparseCellSet, Visited};
use crate::spatial::{BoundingBox, Cell, Solidity};

/// Group every solid cell inside `bounds`
///
/// Groups are returned in discovery order (row-major scan of `bounds`) and
/// members in visit order. Cells outside `bounds` are never visited, even if
/// the predicate reports them solid.
pub fn group_all<S>(solid: &S, bounds: BoundingBox) -> Vec<Vec<Cell>>
where
    S: Solidity + ?Sized,
{
    let mut visited = CellSet::new(bounds);
    let mut groups = Vec::new();

    for cell in bounds.cells() {
        if let Some(group) = flood(solid, cell, &mut visited) {
            groups.push(group);
        }
    }

    groups
}

/// Group the solid cells connected to any of `seeds`
///
/// Non-solid seeds are skipped. Two seeds in the same component produce a
/// single group. Expansion is limited to `bounds`.
pub fn group_from_seeds<S>(solid: &S, seeds: &[Cell], bounds: BoundingBox) -> Vec<Vec<Cell>>
where
    S: Solidity + ?Sized,
{
    let mut visited = SparseCellSet::new(bounds);
    seeds
        .iter()
        .filter_map(|&seed| flood(solid, seed, &mut visited))
        .collect()
}

// Collects the component containing `start` unless it is not solid or already visited
fn flood<S, V>(solid: &S, start: Cell, visited: &mut V) -> Option<Vec<Cell>>
where
    S: Solidity + ?Sized,
    V: Visited,
{
    if visited.contains(start) || !solid.is_solid(start) || !visited.insert(start) {
        return None;
    }

    let mut members = Vec::new();
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        members.push(cell);
        for neighbor in cell.neighbors() {
            // insert() rejects cells outside the bounds and already-seen cells
            if !visited.contains(neighbor) && solid.is_solid(neighbor) && visited.insert(neighbor)
            {
                stack.push(neighbor);
            }
        }
    }

    Some(members)
}
