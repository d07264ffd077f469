//! Tracing subscriber setup for the command-line tool
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! binaries. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level
///
/// `quiet` wins over `verbose`.
pub const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "tileloops=debug",
        (false, false) => "tileloops=info",
    }
}

/// Build the filter used by [`init`]
pub fn env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_missing| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Install a global formatted subscriber writing to stderr
///
/// Does nothing if a global subscriber is already set.
pub fn init(verbose: bool, quiet: bool) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
