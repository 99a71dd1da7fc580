//! MetaTitle CLI: resolve display and social titles from a site snapshot.
//!
//! Loads the title settings from `~/.metatitle/metatitle.toml` (or
//! `--config`), reads a TOML site snapshot, and prints the resolved titles.

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
