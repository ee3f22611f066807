//! anyconf: load, merge and convert configuration files
//!
//! Reads JSON, YAML, TOML, INI, XML and Java properties files, merges them
//! in order under a chosen strategy, and writes the result in any format
//! that has a writer.

use anyhow::Result;

mod cli;
mod config;

fn main() -> Result<()> {
    cli::run()
}
