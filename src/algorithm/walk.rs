//! Walking exposed edges into closed, minimal polygon loops
//!
//! Each walk starts at the smallest remaining vertex in row-major order and
//! leaves it along the first available of right, down, left, up. At every
//! following vertex the next edge is chosen by a fixed turn priority relative
//! to the travel direction: clockwise turn, counter-clockwise turn, straight
//! on. The walk never reverses. Vertices where travel continues straight are
//! not emitted, so loops carry corners only.

use tracing::trace;

use crate::algorithm::edges::{Edge, EdgeSet};
use crate::io::error::{BoundaryError, Result};
use crate::spatial::{Cell, Direction, Solidity, Vertex};

/// Closed orthogonal polygon given by its corner vertices
///
/// The last vertex connects back to the first. No three consecutive vertices
/// are colinear.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loop {
    vertices: Vec<Vertex>,
}

impl Loop {
    /// Wrap an ordered corner list without checking it
    pub const fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Corner vertices in walk order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of corners
    pub const fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Test if the loop has no corners
    pub const fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive corner pairs, including the closing segment
    pub fn segments(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.vertices.iter().copied().cycle().skip(1))
    }

    /// Unit edges covered by the loop's segments
    ///
    /// Diagonal segments contribute nothing; a well-formed loop has none.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (from, to) in self.segments() {
            let step = match (to.x - from.x, to.y - from.y) {
                (dx, 0) if dx > 0 => Direction::Right,
                (dx, 0) if dx < 0 => Direction::Left,
                (0, dy) if dy > 0 => Direction::Down,
                (0, dy) if dy < 0 => Direction::Up,
                _ => continue,
            };
            let mut current = from;
            while current != to {
                let next = current.step(step);
                edges.push(Edge::new(current, next));
                current = next;
            }
        }
        edges
    }

    /// Twice the signed area (positive for clockwise on screen)
    pub fn doubled_area(&self) -> i64 {
        self.segments()
            .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
            .sum()
    }

    /// Same loop rotated to start at its smallest vertex
    ///
    /// Two loops tracing the same boundary in the same direction compare equal
    /// after canonicalization regardless of where their walks began.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let start = self
            .vertices
            .iter()
            .enumerate()
            .min_by_key(|&(_, vertex)| *vertex)
            .map_or(0, |(index, _)| index);
        let mut vertices = self.vertices.clone();
        vertices.rotate_left(start);
        Self { vertices }
    }
}

/// Candidate exits at a vertex, best first, for a given travel direction
pub const fn turn_priority(heading: Direction) -> [Direction; 3] {
    [heading.clockwise(), heading.counter_clockwise(), heading]
}

/// Walk an edge set into closed loops, consuming it
///
/// # Errors
///
/// Returns [`BoundaryError::InconsistentTopology`] when a walk reaches a
/// vertex with no untraversed edge before closing, or takes more steps than
/// there are edges. Both mean the edge set was not a union of closed loops.
pub fn walk_loops(mut edges: EdgeSet) -> Result<Vec<Loop>> {
    let budget = edges.len();
    let mut loops = Vec::new();

    while let Some(start) = edges.min_vertex() {
        let mask = edges.incident(start);
        let Some(first) = Direction::ALL
            .into_iter()
            .find(|direction| mask & direction.bit() != 0)
        else {
            return Err(BoundaryError::InconsistentTopology {
                vertex: start,
                reason: "vertex listed without incident edges".to_string(),
            });
        };

        let walked = walk_one(&mut edges, start, first, budget)?;
        trace!(start = %start, corners = walked.len(), "closed boundary loop");
        loops.push(walked);
    }

    Ok(loops)
}

fn walk_one(edges: &mut EdgeSet, start: Vertex, first: Direction, budget: usize) -> Result<Loop> {
    let mut vertices = vec![start];
    edges.remove(start, first);
    let mut current = start.step(first);
    let mut heading = first;
    let mut steps = 1;

    while current != start {
        if steps >= budget {
            return Err(BoundaryError::InconsistentTopology {
                vertex: current,
                reason: format!("walk from {start} exceeded {budget} edges without closing"),
            });
        }

        let Some(next) = turn_priority(heading)
            .into_iter()
            .find(|&direction| edges.contains(current, direction))
        else {
            return Err(BoundaryError::InconsistentTopology {
                vertex: current,
                reason: format!("walk from {start} reached a dead end"),
            });
        };

        if next != heading {
            vertices.push(current);
        }
        edges.remove(current, next);
        current = current.step(next);
        heading = next;
        steps += 1;
    }

    // Closing straight through the start vertex makes it a colinear point
    if heading == first && vertices.len() > 1 {
        vertices.remove(0);
    }

    Ok(Loop { vertices })
}

/// Extract every boundary loop of one group
///
/// Collects the group's exposed edges, checks vertex degrees and walks them.
/// An empty group yields no loops.
///
/// # Errors
///
/// Returns [`BoundaryError::InconsistentTopology`] if the collected edges
/// cannot be partitioned into closed loops
pub fn extract_loops<S>(solid: &S, group: &[Cell]) -> Result<Vec<Loop>>
where
    S: Solidity + ?Sized,
{
    let edges = EdgeSet::collect(solid, group);
    edges.validate()?;
    walk_loops(edges)
}
