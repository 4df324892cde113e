use anyhow::Context;
use stzone_db::{
    persistent::{config::SledConfig, sled_store::SledStore},
    records::{DelegationRecordDb, HostZoneDb, SlashRecordDb, UnbondingRecordDb},
    redemption::RedemptionRecordDb,
    transfer::TransferInProgressDb,
};
use tracing::debug;

use super::print_json;
use crate::cli::{InspectArgs, Table};

pub(crate) fn handle_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let config = SledConfig::default()
        .with_path(&args.db)
        .with_tree_name(args.tree.as_str());
    let store = SledStore::open(&config)
        .with_context(|| format!("could not open database at {}", args.db.display()))?;

    debug!(table = ?args.table, "inspecting module state");

    match args.table {
        Table::HostZone => {
            let host_zone = store
                .get_host_zone()?
                .context("host zone has not been initialised")?;
            print_json(&host_zone)
        }
        Table::Delegations => {
            let mut records = store.all_active_delegation_records()?;
            records.extend(store.all_archived_delegation_records()?);
            print_json(&records)
        }
        Table::Unbondings => {
            let mut records = store.all_active_unbonding_records()?;
            records.extend(store.all_archived_unbonding_records()?);
            print_json(&records)
        }
        Table::Redemptions => print_json(&store.all_redemption_records()?),
        Table::Slashes => print_json(&store.all_slash_records()?),
        Table::Transfers => print_json(&store.all_transfers_in_progress()?),
    }
}
