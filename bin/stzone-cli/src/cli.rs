use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use stzone_db::persistent::constants::DEFAULT_TREE_NAME;

#[derive(Parser)]
#[command(
    name = "stzone-cli",
    about = "Liquid staking module genesis and state inspection CLI",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    ValidateGenesis(ValidateGenesisArgs),

    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Check that a genesis file describes a consistent module state", version)]
pub(crate) struct ValidateGenesisArgs {
    #[arg(long, env = "STZONE_GENESIS", help = "the path to the genesis JSON file")]
    pub(crate) genesis: PathBuf,

    #[arg(
        long,
        help = "the path to a params TOML file that replaces the params in the genesis file"
    )]
    pub(crate) params: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Print module state stored in a sled database as JSON", version)]
pub(crate) struct InspectArgs {
    #[arg(long, env = "STZONE_DB", help = "the path to the sled database directory")]
    pub(crate) db: PathBuf,

    #[arg(long, default_value = DEFAULT_TREE_NAME, help = "the sled tree holding module state")]
    pub(crate) tree: String,

    #[arg(value_enum, help = "the part of the state to print")]
    pub(crate) table: Table,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    HostZone,
    Delegations,
    Unbondings,
    Redemptions,
    Slashes,
    Transfers,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn inspect_defaults_to_module_tree() {
        let cli = Cli::try_parse_from(["stzone-cli", "inspect", "--db", "/tmp/db", "host-zone"])
            .expect("must parse");
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(args.tree, DEFAULT_TREE_NAME);
        assert_eq!(args.table, Table::HostZone);
    }
}
