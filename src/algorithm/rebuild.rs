//! Full-region rebuild on a background worker
//!
//! Activating a region (for example on a room transition) regroups every
//! solid tile in it, which is too expensive for the simulation thread's
//! per-tick budget. The pass runs on a dedicated scoped thread that holds the
//! only borrows of the tiles, groups and physics world. The caller blocks on a
//! one-shot completion channel until the worker reports, so no other code can
//! touch tile state in the meantime. There is no timeout and no cancellation.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::algorithm::binder::{bind_groups, release};
use crate::algorithm::coordinator::{CollisionWorld, install};
use crate::algorithm::groups::{GroupTable, extract_groups};
use crate::algorithm::grouping::group_all;
use crate::io::configuration::REBUILD_THREAD_NAME;
use crate::io::error::{BoundaryError, Result, invalid_parameter};
use crate::physics::{PhysicsError, PhysicsWorld};
use crate::spatial::{ActiveRegion, SolidFilter, TileStore};

/// Summary of a full-region rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Groups published for the new region
    pub groups: usize,
    /// Loops extracted across all groups
    pub loops: usize,
    /// Tiles assigned to a group
    pub tiles_grouped: usize,
    /// Colliders of the previous region that were disposed
    pub colliders_disposed: usize,
    /// Wall time spent in the worker
    pub elapsed: Duration,
}

impl<P: PhysicsWorld + Send> CollisionWorld<P> {
    /// Make `region` the active region and rebuild all of its geometry
    ///
    /// The configured margin is added to `region`. Every group of the previous
    /// region is released first; the full grouping, extraction and binding
    /// pass then runs on a background worker while this thread waits.
    ///
    /// # Errors
    ///
    /// Returns an error if the margin pushes `region` past the coordinate range
    /// (nothing changes in that case), if extraction or collider creation
    /// fails (nothing of the new region is published), if disposing the
    /// previous region's colliders fails, or if the worker dies without
    /// reporting.
    pub fn activate_region(&mut self, region: ActiveRegion) -> Result<RebuildReport> {
        let margin = self.config.region_margin;
        let region = region.checked_margin(margin).ok_or_else(|| {
            invalid_parameter(
                "region_margin",
                &margin,
                &"region grown by this margin leaves the coordinate range",
            )
        })?;

        let mut disposal_error: Option<PhysicsError> = None;
        let mut colliders_disposed = 0;
        for (_, record) in self.groups.drain() {
            match release(&mut self.physics, &record.colliders) {
                Ok(count) => colliders_disposed += count,
                Err(error) => {
                    disposal_error.get_or_insert(error);
                }
            }
        }
        self.tiles.clear_groups();
        self.region = region;

        let tiles = &mut self.tiles;
        let groups = &mut self.groups;
        let physics = &mut self.physics;

        let mut report = thread::scope(|scope| -> Result<RebuildReport> {
            let (done, completion) = mpsc::sync_channel(1);
            let worker = thread::Builder::new()
                .name(REBUILD_THREAD_NAME.to_string())
                .spawn_scoped(scope, move || {
                    let result = rebuild_region(tiles, groups, physics, &region);
                    if done.send(result).is_err() {
                        debug!("rebuild result dropped before delivery");
                    }
                })
                .map_err(|error| BoundaryError::Worker {
                    reason: format!("could not spawn {REBUILD_THREAD_NAME}: {error}"),
                })?;

            let outcome = completion.recv().map_err(|_disconnected| BoundaryError::Worker {
                reason: "worker exited without reporting completion".to_string(),
            });
            worker.join().map_err(|_panic| BoundaryError::Worker {
                reason: "worker panicked".to_string(),
            })?;
            outcome?
        })?;

        report.colliders_disposed = colliders_disposed;
        info!(
            groups = report.groups,
            loops = report.loops,
            tiles = report.tiles_grouped,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "activated region"
        );

        if let Some(source) = disposal_error {
            warn!(%source, "previous region left colliders behind");
            return Err(BoundaryError::from(source));
        }
        Ok(report)
    }
}

// Runs on the worker thread with exclusive access to tile state
fn rebuild_region<P>(
    tiles: &mut TileStore,
    groups: &mut GroupTable,
    physics: &mut P,
    region: &ActiveRegion,
) -> Result<RebuildReport>
where
    P: PhysicsWorld + ?Sized,
{
    let start = Instant::now();

    let pending = {
        let solid = SolidFilter::new(&*tiles, region);
        let cell_groups = match region.clip(&tiles.bounds()) {
            Some(bounds) => group_all(&solid, bounds),
            None => Vec::new(),
        };
        extract_groups(&solid, cell_groups)?
    };

    let records = bind_groups(physics, pending).map_err(|(index, source)| {
        BoundaryError::Physics {
            group: Some(index as u32),
            source,
        }
    })?;

    let mut report = RebuildReport::default();
    for record in records {
        report.groups += 1;
        report.loops += record.loops.len();
        report.tiles_grouped += record.members.len();
        install(tiles, groups, record);
    }
    report.elapsed = start.elapsed();
    Ok(report)
}
