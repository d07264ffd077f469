//! Incremental maintenance of collision geometry as tiles die and revive
//!
//! Destroy and revive events are queued and applied together on the next
//! [`CollisionWorld::tick`]. All tiles affected in that tick are unioned, the
//! groups touching them are regrouped and re-extracted once, and the result
//! replaces the stale groups only after every new collider has been created.
//! Groups away from the affected tiles are never touched.

use std::collections::{BTreeSet, HashMap};
use std::mem;
use std::time::Duration;

use tracing::{debug, warn};

use crate::algorithm::binder::{bind_groups, release};
use crate::algorithm::destruction::{Destructibility, WeaponFlags};
use crate::algorithm::groups::{GroupId, GroupRecord, GroupTable, extract_groups};
use crate::algorithm::grouping::group_from_seeds;
use crate::algorithm::walk::Loop;
use crate::io::configuration::{DEFERRAL_WARN_TICKS, WorldConfig};
use crate::io::error::{BoundaryError, Result};
use crate::physics::{ColliderHandle, PhysicsError, PhysicsWorld};
use crate::spatial::{ActiveRegion, Cell, SolidFilter, Solidity, TileGrid, TileStore};

/// What one call to [`CollisionWorld::tick`] changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tiles that died this tick
    pub destroyed: Vec<Cell>,
    /// Tiles that came back to life this tick
    pub revived: Vec<Cell>,
    /// Tiles whose revival was postponed because an entity overlaps them
    pub deferred: Vec<Cell>,
    /// Groups replaced by regrouping
    pub groups_removed: usize,
    /// Groups created by regrouping
    pub groups_rebuilt: usize,
    /// Colliders registered with the physics engine
    pub colliders_created: usize,
    /// Colliders removed from the physics engine
    pub colliders_disposed: usize,
}

impl TickReport {
    /// Whether the tick changed any tile state
    pub fn changed(&self) -> bool {
        !self.destroyed.is_empty() || !self.revived.is_empty()
    }
}

/// Tile level, its groups, and the physics world they are published to
///
/// Single writer: every mutation of tiles, groups and colliders goes through
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct CollisionWorld<P> {
    pub(crate) tiles: TileStore,
    pub(crate) region: ActiveRegion,
    pub(crate) groups: GroupTable,
    pub(crate) physics: P,
    pub(crate) config: WorldConfig,
    pending_destroy: Vec<Cell>,
    pending_revive: Vec<Cell>,
    retry: Vec<Cell>,
    unreported: TickReport,
    dead: Vec<Cell>,
    deferrals: HashMap<Cell, u32>,
}

impl<P: PhysicsWorld> CollisionWorld<P> {
    /// Wrap a tile level and physics world
    ///
    /// No geometry exists until a region is activated. Tiles already dead in
    /// `tiles` keep their remaining revive countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(tiles: TileStore, physics: P, config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let dead = tiles.dead_cells();
        Ok(Self {
            tiles,
            region: ActiveRegion::unbounded(),
            groups: GroupTable::new(),
            physics,
            config,
            pending_destroy: Vec::new(),
            pending_revive: Vec::new(),
            retry: Vec::new(),
            unreported: TickReport::default(),
            dead,
            deferrals: HashMap::new(),
        })
    }

    /// Tile arena
    pub const fn tiles(&self) -> &TileStore {
        &self.tiles
    }

    /// Currently active region, margin included
    pub const fn region(&self) -> &ActiveRegion {
        &self.region
    }

    /// Live groups
    pub const fn groups(&self) -> &GroupTable {
        &self.groups
    }

    /// Physics world
    pub const fn physics(&self) -> &P {
        &self.physics
    }

    /// Mutable physics world, for moving dynamic entities
    pub const fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Runtime parameters
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Whether the cell is solid ground right now
    pub fn is_solid(&self, cell: Cell) -> bool {
        SolidFilter::new(&self.tiles, &self.region).is_solid(cell)
    }

    /// Every published loop
    pub fn loops(&self) -> impl Iterator<Item = &Loop> + '_ {
        self.groups
            .iter()
            .flat_map(|(_, record)| record.loops.iter())
    }

    /// Group currently holding the tile
    pub fn group_of(&self, cell: Cell) -> Option<GroupId> {
        self.tiles.tile(cell).and_then(|tile| tile.group)
    }

    /// Colliders shared by the tile's group
    pub fn colliders_at(&self, cell: Cell) -> &[ColliderHandle] {
        match self.group_of(cell).and_then(|id| self.groups.get(id)) {
            Some(record) => &record.colliders,
            None => &[],
        }
    }

    /// Number of live groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of published colliders
    pub fn collider_count(&self) -> usize {
        self.groups.collider_count()
    }

    /// Cells currently dead
    pub fn dead_cells(&self) -> &[Cell] {
        &self.dead
    }

    /// Whether events or a failed rebuild are waiting for the next tick
    pub fn has_pending(&self) -> bool {
        !self.pending_destroy.is_empty() || !self.pending_revive.is_empty() || !self.retry.is_empty()
    }

    /// Queue destruction of an alive tile
    ///
    /// Returns `false` when there is no alive tile at `cell`.
    pub fn destroy(&mut self, cell: Cell) -> bool {
        if !self.tiles.is_alive(cell) {
            return false;
        }
        self.pending_destroy.push(cell);
        true
    }

    /// Apply a weapon hit, queueing destruction if the predicate allows it
    ///
    /// Only solid tiles can be hit.
    pub fn hit<D>(&mut self, cell: Cell, weapons: WeaponFlags, destructibility: &D) -> bool
    where
        D: Destructibility + ?Sized,
    {
        self.is_solid(cell) && destructibility.is_destroyed_by(cell, weapons) && self.destroy(cell)
    }

    /// Request revival of a dead tile at the next tick, skipping its countdown
    ///
    /// The overlap check still applies. Returns `false` for alive or missing tiles.
    pub fn revive_now(&mut self, cell: Cell) -> bool {
        if !self.tiles.tile_exists_at(cell) || self.tiles.is_alive(cell) {
            return false;
        }
        self.pending_revive.push(cell);
        true
    }

    /// Advance the simulation by `elapsed`
    ///
    /// Applies queued destroys, revives tiles whose countdown ran out and whose
    /// footprint is clear, then rebuilds the affected groups in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if loop extraction finds inconsistent topology, or if
    /// the physics engine fails to create or dispose colliders. When extraction
    /// or creation fails the previous groups stay published and the affected
    /// tiles are retried on the next tick. Tile changes applied by a failed
    /// tick are included in the next report that is returned.
    pub fn tick(&mut self, elapsed: Duration) -> Result<TickReport> {
        let mut report = mem::take(&mut self.unreported);
        let mut affected = mem::take(&mut self.retry);

        let expired = self.advance_countdowns(elapsed);

        for cell in mem::take(&mut self.pending_destroy) {
            if self.kill(cell) {
                affected.push(cell);
                affected.extend(cell.neighbors());
                report.destroyed.push(cell);
            }
        }

        for cell in expired {
            if self
                .physics
                .is_any_dynamic_entity_overlapping(&cell.footprint())
            {
                self.defer(cell);
                report.deferred.push(cell);
                continue;
            }
            if self.revive(cell) {
                affected.push(cell);
                affected.extend(cell.neighbors());
                report.revived.push(cell);
            }
        }

        if !affected.is_empty() {
            if let Err(error) = self.rebuild(&affected, &mut report) {
                self.unreported = report;
                return Err(error);
            }
        }

        Ok(report)
    }

    // Counts down dead tiles and returns those ready to revive
    fn advance_countdowns(&mut self, elapsed: Duration) -> Vec<Cell> {
        for cell in mem::take(&mut self.pending_revive) {
            if let Some(tile) = self.tiles.tile_mut(cell) {
                tile.revive_countdown = Duration::ZERO;
            }
        }

        let mut expired = Vec::new();
        for &cell in &self.dead {
            if let Some(tile) = self.tiles.tile_mut(cell) {
                tile.revive_countdown = tile.revive_countdown.saturating_sub(elapsed);
                if tile.revive_countdown.is_zero() {
                    expired.push(cell);
                }
            }
        }
        expired
    }

    fn kill(&mut self, cell: Cell) -> bool {
        let revive_delay = self.config.revive_delay;
        let Some(tile) = self.tiles.tile_mut(cell) else {
            return false;
        };
        if !tile.alive {
            return false;
        }
        tile.alive = false;
        tile.revive_countdown = revive_delay;
        self.dead.push(cell);
        true
    }

    fn revive(&mut self, cell: Cell) -> bool {
        if self.tiles.set_alive(cell, true) != Some(false) {
            return false;
        }
        self.dead.retain(|&dead| dead != cell);
        self.deferrals.remove(&cell);
        true
    }

    fn defer(&mut self, cell: Cell) {
        let count = self.deferrals.entry(cell).or_insert(0);
        *count = count.saturating_add(1);
        if *count == DEFERRAL_WARN_TICKS {
            warn!(cell = %cell, ticks = *count, "tile revival blocked by an overlapping entity");
        }
    }

    // Regroups everything connected to `affected`, replacing stale groups on success
    fn rebuild(&mut self, affected: &[Cell], report: &mut TickReport) -> Result<()> {
        let stale: BTreeSet<GroupId> = affected
            .iter()
            .filter_map(|&cell| self.tiles.tile(cell).and_then(|tile| tile.group))
            .collect();

        let Some(bounds) = self.region.clip(&self.tiles.bounds()) else {
            return self.replace(&stale, Vec::new(), report);
        };

        let pending = {
            let solid = SolidFilter::new(&self.tiles, &self.region);

            // Stale members are seeds too, so every tile that loses its group is regrouped
            let mut seeds: Vec<Cell> = affected.to_vec();
            for &id in &stale {
                if let Some(record) = self.groups.get(id) {
                    seeds.extend_from_slice(&record.members);
                }
            }

            let cell_groups = group_from_seeds(&solid, &seeds, bounds);
            extract_groups(&solid, cell_groups)
        };
        let pending = match pending {
            Ok(pending) => pending,
            Err(error) => {
                warn!(%error, "loop extraction failed, keeping previous geometry");
                self.retry = affected.to_vec();
                return Err(error);
            }
        };

        match bind_groups(&mut self.physics, pending) {
            Ok(records) => self.replace(&stale, records, report),
            Err((index, source)) => {
                warn!(
                    %source,
                    failed_group = index,
                    "collider binding failed, keeping previous geometry"
                );
                self.retry = affected.to_vec();
                Err(BoundaryError::Physics {
                    group: Some(index as u32),
                    source,
                })
            }
        }
    }

    fn replace(
        &mut self,
        stale: &BTreeSet<GroupId>,
        records: Vec<GroupRecord>,
        report: &mut TickReport,
    ) -> Result<()> {
        let mut first_error: Option<PhysicsError> = None;

        for &id in stale {
            let Some(record) = self.groups.remove(id) else {
                continue;
            };
            match release(&mut self.physics, &record.colliders) {
                Ok(count) => report.colliders_disposed += count,
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
            for &cell in &record.members {
                if let Some(tile) = self.tiles.tile_mut(cell) {
                    if tile.group == Some(id) {
                        tile.group = None;
                    }
                }
            }
            report.groups_removed += 1;
        }

        for record in records {
            report.colliders_created += record.colliders.len();
            let id = install(&mut self.tiles, &mut self.groups, record);
            debug!(group = %id, "rebuilt group");
            report.groups_rebuilt += 1;
        }

        first_error.map_or(Ok(()), |source| Err(BoundaryError::from(source)))
    }
}

/// Store a bound group and point its tiles at it
pub(crate) fn install(tiles: &mut TileStore, groups: &mut GroupTable, record: GroupRecord) -> GroupId {
    let members = record.members.clone();
    let id = groups.insert(record);
    for cell in members {
        if let Some(tile) = tiles.tile_mut(cell) {
            tile.group = Some(id);
        }
    }
    id
}
