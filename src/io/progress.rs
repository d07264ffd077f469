//! Progress display for long simulation runs

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::coordinator::TickReport;

static TICK_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} ticks")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tick progress bar with running destroy and revive totals
pub struct TickProgress {
    bar: Option<ProgressBar>,
    destroyed: usize,
    revived: usize,
    deferred: usize,
}

impl TickProgress {
    /// Create a bar for `ticks` steps, or a silent tracker when `visible` is false
    pub fn new(ticks: usize, visible: bool) -> Self {
        let bar = visible.then(|| {
            let bar = ProgressBar::new(ticks as u64);
            bar.set_style(TICK_STYLE.clone());
            bar
        });
        Self {
            bar,
            destroyed: 0,
            revived: 0,
            deferred: 0,
        }
    }

    /// Record one finished tick
    pub fn record(&mut self, report: &TickReport) {
        self.destroyed += report.destroyed.len();
        self.revived += report.revived.len();
        self.deferred += report.deferred.len();
        if let Some(bar) = &self.bar {
            bar.set_message(self.summary());
            bar.inc(1);
        }
    }

    /// Running totals as a short message
    pub fn summary(&self) -> String {
        format!(
            "destroyed {} revived {} deferred {}",
            self.destroyed, self.revived, self.deferred
        )
    }

    /// Totals of destroyed, revived and deferred tiles
    pub const fn totals(&self) -> (usize, usize, usize) {
        (self.destroyed, self.revived, self.deferred)
    }

    /// Close the bar, leaving the final state on screen
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(self.summary());
        }
    }
}
