//! Consistency check of published geometry against the tile state
//!
//! Recomputes exposed edges straight from the solid predicate and compares
//! them with the loops held by the group table.

use std::collections::{HashMap, HashSet};

use crate::algorithm::coordinator::CollisionWorld;
use crate::algorithm::edges::{Edge, exposed_edges};
use crate::algorithm::groups::GroupId;
use crate::algorithm::walk::Loop;
use crate::io::error::{Result, invariant_violation};
use crate::physics::PhysicsWorld;
use crate::spatial::{Cell, Direction, SolidFilter, Solidity};

/// Totals observed by a successful audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Solid tiles checked
    pub tiles: usize,
    /// Live groups
    pub groups: usize,
    /// Published loops
    pub loops: usize,
    /// Exposed unit edges
    pub edges: usize,
}

/// Verify every structural invariant of the world's geometry
///
/// Checks that each solid tile sits in exactly one group and adjacent solid
/// tiles share it, that loop edges cover the exposed edges exactly once, that
/// loops are closed orthogonal polygons without colinear corners, and that each
/// group holds one collider per loop.
///
/// # Errors
///
/// Returns [`crate::BoundaryError::InvariantViolation`] describing the first
/// problem found
pub fn audit<P: PhysicsWorld>(world: &CollisionWorld<P>) -> Result<AuditReport> {
    let solid = SolidFilter::new(world.tiles(), world.region());
    let mut report = AuditReport::default();

    let mut owner: HashMap<Cell, GroupId> = HashMap::new();
    for (id, record) in world.groups().iter() {
        report.groups += 1;
        if record.colliders.len() != record.loops.len() {
            return Err(invariant_violation(
                "one collider per loop",
                &format!(
                    "{id} has {} loops but {} colliders",
                    record.loops.len(),
                    record.colliders.len()
                ),
            ));
        }
        for &cell in &record.members {
            if let Some(previous) = owner.insert(cell, id) {
                return Err(invariant_violation(
                    "single group membership",
                    &format!("tile {cell} listed in {previous} and {id}"),
                ));
            }
        }
    }

    let mut solid_cells = Vec::new();
    for (cell, tile) in world.tiles().tiles() {
        let is_solid = solid.is_solid(cell);
        let listed = owner.get(&cell).copied();
        if is_solid {
            solid_cells.push(cell);
            if tile.group.is_none() || tile.group != listed {
                return Err(invariant_violation(
                    "single group membership",
                    &format!("solid tile {cell} has group {:?}, listed in {listed:?}", tile.group),
                ));
            }
            for direction in [Direction::Right, Direction::Down] {
                let neighbor = cell.offset(direction);
                if solid.is_solid(neighbor) && owner.get(&neighbor).copied() != listed {
                    return Err(invariant_violation(
                        "maximal groups",
                        &format!("adjacent solid tiles {cell} and {neighbor} are in different groups"),
                    ));
                }
            }
        } else if listed.is_some() || tile.group.is_some() {
            return Err(invariant_violation(
                "single group membership",
                &format!("non-solid tile {cell} still belongs to a group"),
            ));
        }
    }
    report.tiles = solid_cells.len();

    let mut walked: HashSet<Edge> = HashSet::new();
    for boundary in world.loops() {
        report.loops += 1;
        check_loop_shape(boundary)?;
        for edge in boundary.edges() {
            if !walked.insert(edge) {
                return Err(invariant_violation(
                    "coverage",
                    &format!("edge {edge} appears in more than one loop position"),
                ));
            }
        }
    }

    let exposed = exposed_edges(&solid, solid_cells);
    if let Some(edge) = exposed.difference(&walked).next() {
        return Err(invariant_violation(
            "coverage",
            &format!("exposed edge {edge} is missing from every loop"),
        ));
    }
    if let Some(edge) = walked.difference(&exposed).next() {
        return Err(invariant_violation(
            "coverage",
            &format!("loop edge {edge} is not exposed"),
        ));
    }
    report.edges = exposed.len();

    Ok(report)
}

// Closed orthogonal polygon with a corner at every vertex
fn check_loop_shape(boundary: &Loop) -> Result<()> {
    if boundary.len() < 4 {
        return Err(invariant_violation(
            "closed loop",
            &format!("loop has only {} corners", boundary.len()),
        ));
    }

    let mut headings = Vec::with_capacity(boundary.len());
    for (from, to) in boundary.segments() {
        let heading = match (to.x - from.x, to.y - from.y) {
            (dx, 0) if dx > 0 => Direction::Right,
            (dx, 0) if dx < 0 => Direction::Left,
            (0, dy) if dy > 0 => Direction::Down,
            (0, dy) if dy < 0 => Direction::Up,
            _ => {
                return Err(invariant_violation(
                    "closed loop",
                    &format!("segment {from}-{to} is not a non-empty axis-aligned run"),
                ));
            }
        };
        headings.push(heading);
    }

    let turns = headings.iter().zip(headings.iter().cycle().skip(1));
    for ((incoming, outgoing), vertex) in turns.zip(boundary.vertices().iter().cycle().skip(1)) {
        if incoming == outgoing || *incoming == outgoing.opposite() {
            return Err(invariant_violation(
                "no colinear corners",
                &format!("vertex {vertex} does not turn"),
            ));
        }
    }

    Ok(())
}
