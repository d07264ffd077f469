/// Command-line harness
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// Overlay image export
pub mod image;
/// Level image loading
pub mod level;
/// Tracing subscriber setup
pub mod logging;
/// Tick progress display
pub mod progress;
