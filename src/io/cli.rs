//! Command-line harness: load a level image, activate a room, churn and export

use crate::algorithm::audit::audit;
use crate::algorithm::churn::ChurnDriver;
use crate::algorithm::coordinator::CollisionWorld;
use crate::io::configuration::{
    DEFAULT_CHURN_PER_TICK, DEFAULT_REGION_MARGIN, DEFAULT_REVIVE_DELAY, DEFAULT_SEED,
    DEFAULT_TICK, DEFAULT_TICKS, OUTPUT_SUFFIX, WorldConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_overlay;
use crate::io::level::load_level;
use crate::io::progress::TickProgress;
use crate::physics::MemoryPhysics;
use crate::spatial::{ActiveRegion, BoundingBox, Cell};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tileloops")]
#[command(
    author,
    version,
    about = "Extract and maintain collision loops for a destructible tile level"
)]
/// Command-line arguments for the collision loop tool
pub struct Cli {
    /// Level image; every opaque pixel is a tile
    #[arg(value_name = "MAP")]
    pub target: PathBuf,

    /// Room to activate as `x,y,width,height` (defaults to the whole level)
    #[arg(short, long, value_parser = parse_room)]
    pub room: Option<BoundingBox>,

    /// Extra tiles around the room that still count as active
    #[arg(short, long, default_value_t = DEFAULT_REGION_MARGIN)]
    pub margin: i32,

    /// Number of simulation ticks to run after activation
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    pub ticks: usize,

    /// Random tiles destroyed per tick
    #[arg(short, long, default_value_t = DEFAULT_CHURN_PER_TICK)]
    pub churn: usize,

    /// Random seed for reproducible churn
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Milliseconds a destroyed tile stays dead
    #[arg(long, default_value_t = DEFAULT_REVIVE_DELAY.as_millis() as u64)]
    pub revive_ms: u64,

    /// Overlay PNG path (defaults to `<MAP>_loops.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check every invariant after each tick
    #[arg(short, long)]
    pub audit: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every rebuilt group
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// World parameters selected by the flags
    pub const fn world_config(&self) -> WorldConfig {
        WorldConfig {
            revive_delay: Duration::from_millis(self.revive_ms),
            region_margin: self.margin,
        }
    }

    /// Where the overlay image is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.target))
    }
}

/// Parse a room given as `x,y,width,height`
///
/// # Errors
///
/// Returns a message if the text does not hold four integers, the size is
/// not positive, or the room reaches past the coordinate range
pub fn parse_room(text: &str) -> std::result::Result<BoundingBox, String> {
    let parts: Vec<i32> = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|error| format!("invalid room '{text}': {error}"))?;

    match parts.as_slice() {
        &[x, y, width, height] if width > 0 && height > 0 => {
            BoundingBox::checked_from_origin(Cell::new(x, y), width as usize, height as usize)
                .ok_or_else(|| {
                    invalid_parameter("room", &text, &"room leaves the coordinate range")
                        .to_string()
                })
        }
        &[_, _, _, _] => Err(format!("room '{text}' must have a positive size")),
        _ => Err(format!("room '{text}' must be x,y,width,height")),
    }
}

/// Overlay path next to the input, e.g. `level.png` -> `level_loops.png`
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("level");
    let output_name = format!("{stem}{OUTPUT_SUFFIX}.png");
    input_path.with_file_name(output_name)
}

/// Final state of a harness run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: usize,
    /// Live groups at the end
    pub groups: usize,
    /// Published loops at the end
    pub loops: usize,
    /// Tiles destroyed over the run
    pub destroyed: usize,
    /// Tiles revived over the run
    pub revived: usize,
}

/// Run the harness described by the arguments
///
/// # Errors
///
/// Returns an error if:
/// - The level image cannot be loaded
/// - The configuration is invalid
/// - Extraction, binding or an audit fails
/// - The overlay cannot be written
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let tiles = load_level(&cli.target)?;
    let room = cli.room.unwrap_or_else(|| tiles.bounds());
    let mut world = CollisionWorld::new(tiles, MemoryPhysics::new(), cli.world_config())?;

    let rebuild = world.activate_region(ActiveRegion::new(room))?;
    if cli.audit {
        audit(&world)?;
    }
    info!(
        groups = rebuild.groups,
        loops = rebuild.loops,
        "initial geometry ready"
    );

    let mut driver = ChurnDriver::new(cli.seed);
    let mut progress = TickProgress::new(cli.ticks, cli.should_show_progress());
    for _ in 0..cli.ticks {
        if cli.churn > 0 {
            driver.churn(&mut world, cli.churn);
        }
        let report = world.tick(DEFAULT_TICK)?;
        progress.record(&report);
        if cli.audit && report.changed() {
            audit(&world)?;
        }
    }
    progress.finish();

    let output_path = cli.output_path();
    export_overlay(&world, &output_path)?;

    let (destroyed, revived, _) = progress.totals();
    let summary = RunSummary {
        ticks: cli.ticks,
        groups: world.group_count(),
        loops: world.loops().count(),
        destroyed,
        revived,
    };
    info!(
        groups = summary.groups,
        loops = summary.loops,
        destroyed,
        revived,
        output = %output_path.display(),
        "run finished"
    );
    Ok(summary)
}
