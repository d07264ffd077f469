//! CLI entry point for the collision loop harness

use clap::Parser;
use tileloops::io::cli::{Cli, run};
use tileloops::io::logging;

fn main() -> tileloops::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    run(&cli)?;
    Ok(())
}
