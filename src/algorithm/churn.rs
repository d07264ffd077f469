//! Seeded random destruction for stress runs
//!
//! Picks solid tiles inside the active region and queues them for
//! destruction, so long simulations exercise splitting, hole creation and
//! revival merging without scripted input.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::coordinator::CollisionWorld;
use crate::physics::PhysicsWorld;
use crate::spatial::Cell;

// Rejection-sampling attempts per requested tile before giving up
const ATTEMPTS_PER_TARGET: usize = 16;

/// Deterministic generator of destroy events
pub struct ChurnDriver {
    rng: StdRng,
}

impl ChurnDriver {
    /// Create a driver with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose up to `count` distinct solid cells in the active region
    ///
    /// Returns fewer cells when the region is sparse or empty.
    pub fn pick<P: PhysicsWorld>(&mut self, world: &CollisionWorld<P>, count: usize) -> Vec<Cell> {
        let Some(bounds) = world.region().clip(&world.tiles().bounds()) else {
            return Vec::new();
        };

        let mut picked = Vec::with_capacity(count);
        for _ in 0..count.saturating_mul(ATTEMPTS_PER_TARGET) {
            if picked.len() == count {
                break;
            }
            let cell = Cell::new(
                self.rng.random_range(bounds.min.x..=bounds.max.x),
                self.rng.random_range(bounds.min.y..=bounds.max.y),
            );
            if world.is_solid(cell) && !picked.contains(&cell) {
                picked.push(cell);
            }
        }
        picked
    }

    /// Queue destruction of up to `count` random solid tiles
    ///
    /// Returns the cells that were queued.
    pub fn churn<P: PhysicsWorld>(&mut self, world: &mut CollisionWorld<P>, count: usize) -> Vec<Cell> {
        let picked = self.pick(world, count);
        picked
            .into_iter()
            .filter(|&cell| world.destroy(cell))
            .collect()
    }
}
