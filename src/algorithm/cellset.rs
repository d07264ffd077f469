use bitvec::prelude::*;
use std::collections::HashSet;
use std::fmt;

use crate::spatial::{BoundingBox, Cell};

/// Visited set of a flood fill, bounded to a box
pub trait Visited {
    /// Insert a cell, `true` only if it is inside the box and was not yet a member
    fn insert(&mut self, cell: Cell) -> bool;

    /// Test cell membership
    fn contains(&self, cell: Cell) -> bool;
}

/// Fixed-size bitset marking cells inside a bounding box
///
/// Used as the visited set of the flood fill. Cells outside the box are never
/// members and cannot be inserted, which keeps grouping bounded to the region.
#[derive(Clone, Debug)]
pub struct CellSet {
    bits: BitVec,
    bounds: BoundingBox,
}

impl CellSet {
    /// Create an empty set over the given box
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bits: bitvec![0; bounds.area()],
            bounds,
        }
    }

    const fn offset(&self, cell: Cell) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        let row = (cell.y - self.bounds.min.y) as usize;
        let col = (cell.x - self.bounds.min.x) as usize;
        Some(row * self.bounds.width() + col)
    }

    /// Insert a cell
    ///
    /// Returns `true` if the cell was not yet a member. Cells outside the box
    /// are rejected and report `false`.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(offset) = self.offset(cell) else {
            return false;
        };
        if offset >= self.bits.len() || self.bits.get(offset).as_deref() == Some(&true) {
            return false;
        }
        self.bits.set(offset, true);
        true
    }

    /// Test cell membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.offset(cell)
            .is_some_and(|offset| self.bits.get(offset).as_deref() == Some(&true))
    }

    /// Count member cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Box the set is defined over
    pub const fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

impl Visited for CellSet {
    fn insert(&mut self, cell: Cell) -> bool {
        Self::insert(self, cell)
    }

    fn contains(&self, cell: Cell) -> bool {
        Self::contains(self, cell)
    }
}

/// Hashed cell set for fills that touch a small part of a large box
///
/// Memory grows with the members, not with the box.
#[derive(Clone, Debug)]
pub struct SparseCellSet {
    cells: HashSet<Cell>,
    bounds: BoundingBox,
}

impl SparseCellSet {
    /// Create an empty set over the given box
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            cells: HashSet::new(),
            bounds,
        }
    }

    /// Count member cells
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Visited for SparseCellSet {
    fn insert(&mut self, cell: Cell) -> bool {
        self.bounds.contains(cell) && self.cells.insert(cell)
    }

    fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellSet({} of {} cells)",
            self.count(),
            self.bounds.area()
        )
    }
}
