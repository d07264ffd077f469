//! Tile arena with per-cell alive state and group membership
//!
//! Tiles live in a flat `ndarray` array addressed by world coordinate through
//! an origin offset, so negative coordinates are supported. A tile is created
//! once per occupied cell when the level is built and is only ever toggled
//! between alive and dead afterwards.

use ndarray::Array2;
use std::time::Duration;

use crate::algorithm::groups::GroupId;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::coords::Cell;

/// Axis-aligned bounding box over tile cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: Cell,
    /// Maximum coordinates (inclusive)
    pub max: Cell,
}

impl BoundingBox {
    /// Build a box from an origin and a size in tiles
    ///
    /// A zero-sized request yields an empty box. Sizes reaching past the
    /// coordinate range are clamped to its edge.
    pub const fn from_origin(origin: Cell, width: usize, height: usize) -> Self {
        Self {
            min: origin,
            max: Cell::new(span_end(origin.x, width), span_end(origin.y, height)),
        }
    }

    /// Build a box from an origin and a size, `None` if it leaves the coordinate range
    pub fn checked_from_origin(origin: Cell, width: usize, height: usize) -> Option<Self> {
        let last = |start: i32, span: usize| {
            i32::try_from(span)
                .ok()
                .and_then(|span| start.checked_add(span - 1))
        };
        Some(Self {
            min: origin,
            max: Cell::new(last(origin.x, width)?, last(origin.y, height)?),
        })
    }

    /// Check if a cell is within the bounds
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Width in tiles (zero when empty)
    pub const fn width(&self) -> usize {
        if self.max.x < self.min.x {
            0
        } else {
            (self.max.x as i64 - self.min.x as i64 + 1) as usize
        }
    }

    /// Height in tiles (zero when empty)
    pub const fn height(&self) -> usize {
        if self.max.y < self.min.y {
            0
        } else {
            (self.max.y as i64 - self.min.y as i64 + 1) as usize
        }
    }

    /// Number of cells covered
    pub const fn area(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Grow the box by `margin` tiles on every side, clamped to the coordinate range
    #[must_use]
    pub const fn expanded(&self, margin: i32) -> Self {
        Self {
            min: Cell::new(
                self.min.x.saturating_sub(margin),
                self.min.y.saturating_sub(margin),
            ),
            max: Cell::new(
                self.max.x.saturating_add(margin),
                self.max.y.saturating_add(margin),
            ),
        }
    }

    /// Grow the box by `margin` tiles, `None` if it leaves the coordinate range
    pub fn checked_expanded(&self, margin: i32) -> Option<Self> {
        Some(Self {
            min: Cell::new(
                self.min.x.checked_sub(margin)?,
                self.min.y.checked_sub(margin)?,
            ),
            max: Cell::new(
                self.max.x.checked_add(margin)?,
                self.max.y.checked_add(margin)?,
            ),
        })
    }

    /// Overlap of two boxes, if any
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = Cell::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Cell::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        (min.x <= max.x && min.y <= max.y).then_some(Self { min, max })
    }

    /// Iterate all cells row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Cell::new(x, y)))
    }
}

// Last coordinate of a span of `len` cells starting at `start`, saturating
const fn span_end(start: i32, len: usize) -> i32 {
    if len == 0 {
        return start.saturating_sub(1);
    }
    let len = if len > i32::MAX as usize {
        i32::MAX
    } else {
        len as i32
    };
    start.saturating_add(len - 1)
}

/// Source of tile existence and alive state
///
/// Coordinates outside the grid report `false` for both queries, so the edge
/// of the level is naturally treated as exposed boundary.
pub trait TileGrid {
    /// Whether a tile was placed at this cell when the level was built
    fn tile_exists_at(&self, cell: Cell) -> bool;

    /// Whether the tile at this cell exists and is currently alive
    fn is_alive(&self, cell: Cell) -> bool;
}

/// Mutable per-tile state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Alive tiles are solid ground
    pub alive: bool,
    /// Remaining time until revival (meaningful only while dead)
    pub revive_countdown: Duration,
    /// Group assigned by the most recent grouping pass
    pub group: Option<GroupId>,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            alive: true,
            revive_countdown: Duration::ZERO,
            group: None,
        }
    }
}

/// Flat tile arena addressed by world coordinate
#[derive(Debug, Clone)]
pub struct TileStore {
    tiles: Array2<Option<Tile>>,
    origin: Cell,
}

impl TileStore {
    /// Create an empty store covering `width` x `height` cells from `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(origin: Cell, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &"tile store must cover at least one cell",
            ));
        }
        Ok(Self {
            tiles: Array2::from_elem((height, width), None),
            origin,
        })
    }

    /// Build a store from text rows, `#` marking an alive tile
    ///
    /// Row `i`, column `j` maps to cell `(j, i)`. Rows may differ in length.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or every row is empty
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut store = Self::new(Cell::new(0, 0), width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                if symbol == '#' {
                    store.place(Cell::new(x as i32, y as i32));
                }
            }
        }
        Ok(store)
    }

    /// Build the smallest store holding the given cells, all alive
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is empty
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        let Some(first) = cells.first() else {
            return Err(invalid_parameter(
                "cells",
                &"[]",
                &"at least one tile is required",
            ));
        };
        let mut bounds = BoundingBox {
            min: *first,
            max: *first,
        };
        for cell in cells {
            bounds.min = Cell::new(bounds.min.x.min(cell.x), bounds.min.y.min(cell.y));
            bounds.max = Cell::new(bounds.max.x.max(cell.x), bounds.max.y.max(cell.y));
        }
        let mut store = Self::new(bounds.min, bounds.width(), bounds.height())?;
        for &cell in cells {
            store.place(cell);
        }
        Ok(store)
    }

    /// Cells covered by the arena (occupied or not)
    pub fn bounds(&self) -> BoundingBox {
        let (rows, cols) = self.tiles.dim();
        BoundingBox::from_origin(self.origin, cols, rows)
    }

    fn index(&self, cell: Cell) -> Option<[usize; 2]> {
        let row = cell.y.checked_sub(self.origin.y)?;
        let col = cell.x.checked_sub(self.origin.x)?;
        let (rows, cols) = self.tiles.dim();
        (row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols)
            .then_some([row as usize, col as usize])
    }

    /// Place an alive tile, returning `false` if the cell is outside the arena
    pub fn place(&mut self, cell: Cell) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = Some(Tile::default());
            return true;
        }
        false
    }

    /// Tile state at a cell
    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index))
            .and_then(Option::as_ref)
    }

    /// Mutable tile state at a cell
    pub fn tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        let index = self.index(cell)?;
        self.tiles.get_mut(index).and_then(Option::as_mut)
    }

    /// Set the alive flag, returning the previous value if a tile exists
    pub fn set_alive(&mut self, cell: Cell, alive: bool) -> Option<bool> {
        let tile = self.tile_mut(cell)?;
        let previous = tile.alive;
        tile.alive = alive;
        Some(previous)
    }

    /// Iterate every occupied cell with its tile
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, &Tile)> + '_ {
        let origin = self.origin;
        self.tiles
            .indexed_iter()
            .filter_map(move |((row, col), slot)| {
                slot.as_ref().map(|tile| {
                    (
                        Cell::new(origin.x + col as i32, origin.y + row as i32),
                        tile,
                    )
                })
            })
    }

    /// Cells of tiles currently dead
    pub fn dead_cells(&self) -> Vec<Cell> {
        self.tiles()
            .filter(|(_, tile)| !tile.alive)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|slot| slot.is_some()).count()
    }

    /// Forget every group assignment
    pub fn clear_groups(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.group = None;
        }
    }
}

impl TileGrid for TileStore {
    fn tile_exists_at(&self, cell: Cell) -> bool {
        self.tile(cell).is_some()
    }

    fn is_alive(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(|tile| tile.alive)
    }
}
