use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use stzone_keeper::genesis::GenesisState;
use stzone_params::types::ModuleParams;
use tracing::info;

use crate::cli::ValidateGenesisArgs;

pub(crate) fn handle_validate_genesis(args: ValidateGenesisArgs) -> anyhow::Result<()> {
    let mut genesis = load_genesis(&args.genesis)?;
    if let Some(path) = &args.params {
        genesis.params = load_params(path)?;
    }

    genesis
        .validate()
        .context("genesis state is inconsistent")?;

    info!(
        chain_id = %genesis.host_zone.chain_id,
        delegation_records = genesis.delegation_records.len(),
        unbonding_records = genesis.unbonding_records.len(),
        redemption_records = genesis.redemption_records.len(),
        "genesis state is valid"
    );
    println!("genesis state for {} is valid", genesis.host_zone.chain_id);

    Ok(())
}

fn load_genesis(path: &Path) -> anyhow::Result<GenesisState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read genesis file {}", path.display()))?;

    serde_json::from_str(&contents)
        .map_err(|e| anyhow!(format!("Failed to parse genesis file: {}", e)))
}

fn load_params(path: &Path) -> anyhow::Result<ModuleParams> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read params file {}", path.display()))?;

    toml::from_str(&contents).map_err(|e| anyhow!(format!("Failed to parse params file: {}", e)))
}
