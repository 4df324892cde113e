//! CLI for inspecting liquid staking module state.

mod cli;
mod handlers;

use anyhow::{Error, Result};
use clap::Parser;
use stzone_common::logging::{self, LoggerConfig};

use crate::handlers::{genesis, inspect};

fn main() -> Result<(), Error> {
    logging::init(LoggerConfig::new("stzone-cli".to_string()));

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::ValidateGenesis(args) => genesis::handle_validate_genesis(args),
        cli::Commands::Inspect(args) => inspect::handle_inspect(args),
    }
}
