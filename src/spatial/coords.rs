//! Integer grid coordinates for tiles, tile corners and travel directions
//!
//! A tile at `(x, y)` spans the corners `(x, y)` to `(x + 1, y + 1)`. The y axis
//! grows downward, so a clockwise turn from `Right` is `Down`.

use std::fmt;

/// Integer coordinate of a tile cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column
    pub x: i32,
    /// Row (grows downward)
    pub y: i32,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighboring cell one step in the given direction
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four side-sharing neighbors, ordered right, down, left, up
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.offset(Direction::Right),
            self.offset(Direction::Down),
            self.offset(Direction::Left),
            self.offset(Direction::Up),
        ]
    }

    /// Corner vertices in clockwise order starting at the top-left
    pub const fn corners(self) -> [Vertex; 4] {
        [
            Vertex::new(self.x, self.y),
            Vertex::new(self.x + 1, self.y),
            Vertex::new(self.x + 1, self.y + 1),
            Vertex::new(self.x, self.y + 1),
        ]
    }

    /// Unit footprint covered by this tile
    pub const fn footprint(self) -> Footprint {
        Footprint {
            min: Vertex::new(self.x, self.y),
            max: Vertex::new(self.x + 1, self.y + 1),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile corner on the integer lattice
///
/// Ordering is row-major (`y` first, then `x`) so that the minimum vertex of
/// any boundary is its top-left-most corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    /// Horizontal lattice coordinate
    pub x: i32,
    /// Vertical lattice coordinate (grows downward)
    pub y: i32,
}

impl Vertex {
    /// Create a lattice vertex
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighboring vertex one unit step away
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned direction of travel along the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +x
    Right,
    /// +y
    Down,
    /// -x
    Left,
    /// -y
    Up,
}

impl Direction {
    /// All directions in clockwise order starting at `Right`
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    /// Unit step `(dx, dy)`
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
        }
    }

    /// Quarter turn clockwise on screen
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }

    /// Quarter turn counter-clockwise on screen
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }

    /// Reverse direction
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
        }
    }

    /// Bit used in incident-edge masks
    pub const fn bit(self) -> u8 {
        match self {
            Self::Right => 0b0001,
            Self::Down => 0b0010,
            Self::Left => 0b0100,
            Self::Up => 0b1000,
        }
    }

    /// Direction of a unit step between two adjacent vertices
    pub const fn between(from: Vertex, to: Vertex) -> Option<Self> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Some(Self::Right),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (0, -1) => Some(Self::Up),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle in tile units, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Top-left corner
    pub min: Vertex,
    /// Bottom-right corner
    pub max: Vertex,
}

impl Footprint {
    /// Test whether two footprints share any interior area
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
