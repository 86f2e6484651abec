//! Crestwalk CLI: print inventory types, optionally filtered by category and group.

use anyhow::Result;
use clap::Parser;
use crestwalk::engine::arg_parser::Cli;
use crestwalk::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
