//! Active region bounds and the solid-ground predicate
//!
//! Every other component decides what counts as solid ground right now through
//! [`Solidity::is_solid`] on a [`SolidFilter`]: the tile exists, is alive, and
//! lies inside the active region.

use crate::spatial::coords::Cell;
use crate::spatial::grid::{BoundingBox, TileGrid};

/// Answers whether a cell belongs to the currently simulated part of the level
pub trait RegionProvider {
    /// Whether the cell lies inside the active region
    fn is_in_active_region(&self, cell: Cell) -> bool;
}

/// Decides whether a cell counts as solid ground
pub trait Solidity {
    /// Whether the cell is solid right now
    fn is_solid(&self, cell: Cell) -> bool;
}

/// Currently relevant subset of the level, such as the loaded room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRegion {
    bounds: Option<BoundingBox>,
}

impl ActiveRegion {
    /// Region covering the given cells exactly
    pub const fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds: Some(bounds),
        }
    }

    /// Region with no limits, every cell is inside
    pub const fn unbounded() -> Self {
        Self { bounds: None }
    }

    /// Same region grown by `margin` tiles on every side
    #[must_use]
    pub const fn with_margin(self, margin: i32) -> Self {
        match self.bounds {
            Some(bounds) => Self::new(bounds.expanded(margin)),
            None => self,
        }
    }

    /// Same region grown by `margin`, `None` if it would leave the coordinate range
    pub fn checked_margin(self, margin: i32) -> Option<Self> {
        match self.bounds {
            Some(bounds) => bounds.checked_expanded(margin).map(Self::new),
            None => Some(self),
        }
    }

    /// Limits of the region, `None` when unbounded
    pub const fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Check whether a cell lies inside the region
    pub const fn contains(&self, cell: Cell) -> bool {
        match &self.bounds {
            Some(bounds) => bounds.contains(cell),
            None => true,
        }
    }

    /// Cells that can be solid: the region clipped to the tile arena
    pub fn clip(&self, arena: &BoundingBox) -> Option<BoundingBox> {
        match &self.bounds {
            Some(bounds) => bounds.intersection(arena),
            None => Some(*arena),
        }
    }
}

impl RegionProvider for ActiveRegion {
    fn is_in_active_region(&self, cell: Cell) -> bool {
        self.contains(cell)
    }
}

/// Solid-ground predicate combining a tile grid with an active region
#[derive(Debug)]
pub struct SolidFilter<'a, G: ?Sized, R: ?Sized> {
    grid: &'a G,
    region: &'a R,
}

impl<'a, G, R> SolidFilter<'a, G, R>
where
    G: TileGrid + ?Sized,
    R: RegionProvider + ?Sized,
{
    /// Wrap a grid and region
    pub const fn new(grid: &'a G, region: &'a R) -> Self {
        Self { grid, region }
    }
}

impl<G, R> Solidity for SolidFilter<'_, G, R>
where
    G: TileGrid + ?Sized,
    R: RegionProvider + ?Sized,
{
    /// Whether the tile exists, is alive, and lies within the active region
    fn is_solid(&self, cell: Cell) -> bool {
        self.region.is_in_active_region(cell)
            && self.grid.tile_exists_at(cell)
            && self.grid.is_alive(cell)
    }
}
