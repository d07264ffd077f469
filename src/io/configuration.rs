//! Simulation constants and runtime configuration defaults

use std::time::Duration;

use crate::io::error::{Result, invalid_parameter};

/// Time a destroyed tile stays dead before revival is attempted
pub const DEFAULT_REVIVE_DELAY: Duration = Duration::from_secs(3);

/// Extra tiles around a room that still count as active
pub const DEFAULT_REGION_MARGIN: i32 = 1;

/// Largest accepted region margin
pub const MAX_REGION_MARGIN: i32 = 1 << 16;

/// Simulation step used by the command-line harness
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Consecutive deferrals before a blocked revival is reported
pub const DEFERRAL_WARN_TICKS: u32 = 120;

/// Name of the background thread running full-region rebuilds
pub const REBUILD_THREAD_NAME: &str = "region-rebuild";

// Default values for the churn harness
/// Fixed seed for reproducible churn
pub const DEFAULT_SEED: u64 = 42;
/// Default number of simulated ticks
pub const DEFAULT_TICKS: usize = 600;
/// Default number of random tiles destroyed per tick
pub const DEFAULT_CHURN_PER_TICK: usize = 0;

// Output settings
/// Suffix added to overlay filenames
pub const OUTPUT_SUFFIX: &str = "_loops";
/// Pixels per tile in rendered overlays
pub const RENDER_SCALE: u32 = 8;
/// Overlay color for alive tiles
pub const ALIVE_COLOR: [u8; 4] = [96, 96, 96, 255];
/// Overlay color for dead tiles
pub const DEAD_COLOR: [u8; 4] = [200, 60, 60, 255];
/// Overlay color for loop outlines
pub const LOOP_COLOR: [u8; 4] = [250, 220, 40, 255];

/// Minimum alpha for a pixel to become a tile
pub const TILE_ALPHA_THRESHOLD: u8 = 128;

/// Runtime parameters for a collision world
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Time a destroyed tile stays dead before revival is attempted
    pub revive_delay: Duration,
    /// Extra tiles around each activated room that still count as active
    pub region_margin: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            revive_delay: DEFAULT_REVIVE_DELAY,
            region_margin: DEFAULT_REGION_MARGIN,
        }
    }
}

impl WorldConfig {
    /// Check that all parameters are usable
    ///
    /// # Errors
    ///
    /// Returns an error if the margin is negative or above [`MAX_REGION_MARGIN`]
    pub fn validate(&self) -> Result<()> {
        if self.region_margin < 0 {
            return Err(invalid_parameter(
                "region_margin",
                &self.region_margin,
                &"margin cannot be negative",
            ));
        }
        if self.region_margin > MAX_REGION_MARGIN {
            return Err(invalid_parameter(
                "region_margin",
                &self.region_margin,
                &format!("margin cannot exceed {MAX_REGION_MARGIN}"),
            ));
        }
        Ok(())
    }
}
