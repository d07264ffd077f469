//! Exposed tile edges and the vertex incidence map used by the loop walk

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::io::error::{BoundaryError, Result};
use crate::spatial::{Cell, Direction, Solidity, Vertex};

/// Undirected unit segment between two adjacent lattice vertices
///
/// Endpoints are stored in ascending order, so `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    start: Vertex,
    end: Vertex,
}

impl Edge {
    /// Create an edge between two vertices
    pub fn new(a: Vertex, b: Vertex) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Side of a tile facing `direction`
    pub const fn tile_side(cell: Cell, direction: Direction) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = cell.corners();
        // Corners are already in ascending row-major order along each side
        match direction {
            Direction::Right => Self {
                start: top_right,
                end: bottom_right,
            },
            Direction::Down => Self {
                start: bottom_left,
                end: bottom_right,
            },
            Direction::Left => Self {
                start: top_left,
                end: bottom_left,
            },
            Direction::Up => Self {
                start: top_left,
                end: top_right,
            },
        }
    }

    /// Lower endpoint in row-major order
    pub const fn start(&self) -> Vertex {
        self.start
    }

    /// Upper endpoint in row-major order
    pub const fn end(&self) -> Vertex {
        self.end
    }

    /// Both endpoints
    pub const fn vertices(&self) -> (Vertex, Vertex) {
        (self.start, self.end)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Exposed edges indexed by endpoint
///
/// Each vertex maps to a bit mask of the directions in which an edge leaves
/// it, so an edge is recorded at both of its endpoints.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    incidence: HashMap<Vertex, u8>,
    edge_count: usize,
}

impl EdgeSet {
    /// Create an empty edge set
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every exposed side of the given group
    ///
    /// A side is exposed when the cell across it is not solid.
    pub fn collect<S>(solid: &S, group: &[Cell]) -> Self
    where
        S: Solidity + ?Sized,
    {
        let mut edges = Self::new();
        for &cell in group {
            for direction in Direction::ALL {
                if !solid.is_solid(cell.offset(direction)) {
                    edges.insert(Edge::tile_side(cell, direction));
                }
            }
        }
        edges
    }

    /// Add an edge, returning `false` if it was already present
    ///
    /// Edges that are not unit axis-aligned steps are rejected.
    pub fn insert(&mut self, edge: Edge) -> bool {
        let (a, b) = edge.vertices();
        let Some(direction) = Direction::between(a, b) else {
            return false;
        };
        if self.contains(a, direction) {
            return false;
        }
        *self.incidence.entry(a).or_insert(0) |= direction.bit();
        *self.incidence.entry(b).or_insert(0) |= direction.opposite().bit();
        self.edge_count += 1;
        true
    }

    /// Remove the edge leaving `from` in `direction`, returning whether it existed
    pub fn remove(&mut self, from: Vertex, direction: Direction) -> bool {
        if !self.contains(from, direction) {
            return false;
        }
        let to = from.step(direction);
        self.clear_bit(from, direction.bit());
        self.clear_bit(to, direction.opposite().bit());
        self.edge_count -= 1;
        true
    }

    fn clear_bit(&mut self, vertex: Vertex, bit: u8) {
        if let Some(mask) = self.incidence.get_mut(&vertex) {
            *mask &= !bit;
            if *mask == 0 {
                self.incidence.remove(&vertex);
            }
        }
    }

    /// Whether an edge leaves `from` in `direction`
    pub fn contains(&self, from: Vertex, direction: Direction) -> bool {
        self.incident(from) & direction.bit() != 0
    }

    /// Direction mask of edges incident to a vertex
    pub fn incident(&self, vertex: Vertex) -> u8 {
        self.incidence.get(&vertex).copied().unwrap_or(0)
    }

    /// Number of edges
    pub const fn len(&self) -> usize {
        self.edge_count
    }

    /// Test if no edges remain
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Smallest vertex in row-major order that still has an incident edge
    pub fn min_vertex(&self) -> Option<Vertex> {
        self.incidence.keys().min().copied()
    }

    /// Check that every vertex has two or four incident edges
    ///
    /// Any other count means the edges cannot be partitioned into closed loops.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::InconsistentTopology`] naming the first
    /// offending vertex in row-major order
    pub fn validate(&self) -> Result<()> {
        let mut bad: Vec<(Vertex, u32)> = self
            .incidence
            .iter()
            .map(|(&vertex, mask)| (vertex, mask.count_ones()))
            .filter(|&(_, degree)| degree != 2 && degree != 4)
            .collect();
        bad.sort_unstable_by_key(|&(vertex, _)| vertex);

        match bad.first() {
            Some(&(vertex, degree)) => Err(BoundaryError::InconsistentTopology {
                vertex,
                reason: format!("vertex has {degree} incident edges"),
            }),
            None => Ok(()),
        }
    }

    /// Every edge in the set
    pub fn edges(&self) -> HashSet<Edge> {
        let mut edges = HashSet::with_capacity(self.edge_count);
        for (&vertex, &mask) in &self.incidence {
            for direction in Direction::ALL {
                if mask & direction.bit() != 0 {
                    edges.insert(Edge::new(vertex, vertex.step(direction)));
                }
            }
        }
        edges
    }
}

/// Exposed edges of a set of cells computed directly from the predicate
///
/// Reference computation for auditing extracted loops. Cells that are not
/// solid themselves contribute nothing.
pub fn exposed_edges<S>(solid: &S, cells: impl IntoIterator<Item = Cell>) -> HashSet<Edge>
where
    S: Solidity + ?Sized,
{
    let mut edges = HashSet::new();
    for cell in cells {
        if !solid.is_solid(cell) {
            continue;
        }
        for direction in Direction::ALL {
            if !solid.is_solid(cell.offset(direction)) {
                edges.insert(Edge::tile_side(cell, direction));
            }
        }
    }
    edges
}
