//! versebook `preprocess` — assemble the Verse language book for Pandoc.
//!
//! Reads the chapter files of a docs directory in registry order, rewrites
//! them for LaTeX output, and emits one concatenated markdown document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
