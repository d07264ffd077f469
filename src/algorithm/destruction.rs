//! Which weapons may break which tiles
//!
//! Consulted before a destroy event is raised. A hit that the predicate
//! rejects never reaches the coordinator.

use std::ops::BitOr;

use crate::spatial::{BoundingBox, Cell};

/// Set of weapon kinds carried by a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeaponFlags(u8);

impl WeaponFlags {
    /// No weapon
    pub const NONE: Self = Self(0);
    /// Fired projectile
    pub const PROJECTILE: Self = Self(0b001);
    /// Dash attack
    pub const DASH: Self = Self(0b010);
    /// Area explosion
    pub const EXPLOSIVE: Self = Self(0b100);
    /// Every weapon kind
    pub const ALL: Self = Self(0b111);

    /// Combine two flag sets
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every flag of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag is shared with `other`
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for WeaponFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Decides whether a hit with the given weapons destroys a tile
pub trait Destructibility {
    /// Whether `cell` breaks when hit with `weapons`
    fn is_destroyed_by(&self, cell: Cell, weapons: WeaponFlags) -> bool;
}

/// Every tile breaks under any weapon
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyWeapon;

impl Destructibility for AnyWeapon {
    fn is_destroyed_by(&self, _cell: Cell, weapons: WeaponFlags) -> bool {
        !weapons.is_empty()
    }
}

/// Rectangular areas whose tiles break under specific weapons
///
/// Tiles outside every area are indestructible. A tile inside several areas
/// breaks if any of them accepts the weapons.
#[derive(Debug, Clone, Default)]
pub struct DestructionRegions {
    regions: Vec<(BoundingBox, WeaponFlags)>,
}

impl DestructionRegions {
    /// Create an empty set, making every tile indestructible
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow tiles inside `bounds` to break under any of `weapons`
    pub fn add(&mut self, bounds: BoundingBox, weapons: WeaponFlags) {
        self.regions.push((bounds, weapons));
    }
}

impl Destructibility for DestructionRegions {
    fn is_destroyed_by(&self, cell: Cell, weapons: WeaponFlags) -> bool {
        self.regions
            .iter()
            .any(|(bounds, accepted)| bounds.contains(cell) && accepted.intersects(weapons))
    }
}
