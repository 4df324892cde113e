//! Genesis import and export.

use serde::{Deserialize, Serialize};
use stzone_db::{
    kv::KvStore,
    records::{DelegationRecordDb, HostZoneDb, SlashRecordDb, UnbondingRecordDb},
    redemption::RedemptionRecordDb,
    transfer::{TransferInProgress, TransferInProgressDb},
};
use stzone_params::types::ModuleParams;
use stzone_primitives::{
    host_zone::HostZone,
    records::{
        validation::{
            validate_delegation_records, validate_redemption_records, validate_slash_records,
            validate_unbonding_records,
        },
        DelegationRecord, DelegationRecordStatus, RedemptionRecord, SlashRecord, UnbondingRecord,
    },
};
use tracing::info;

use crate::{
    errors::{KeeperError, KeeperResult},
    keeper::Keeper,
};

/// The complete state of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Module parameters.
    #[serde(default)]
    pub params: ModuleParams,
    /// The host zone.
    pub host_zone: HostZone,
    /// Active delegation records.
    #[serde(default)]
    pub delegation_records: Vec<DelegationRecord>,
    /// Archived delegation records.
    #[serde(default)]
    pub archived_delegation_records: Vec<DelegationRecord>,
    /// Active unbonding records.
    #[serde(default)]
    pub unbonding_records: Vec<UnbondingRecord>,
    /// Archived unbonding records.
    #[serde(default)]
    pub archived_unbonding_records: Vec<UnbondingRecord>,
    /// Redemption records.
    #[serde(default)]
    pub redemption_records: Vec<RedemptionRecord>,
    /// Slash records.
    #[serde(default)]
    pub slash_records: Vec<SlashRecord>,
    /// Outbound deposit transfers awaiting their acknowledgement.
    #[serde(default)]
    pub transfers_in_progress: Vec<TransferInProgress>,
}

impl GenesisState {
    /// Checks that the state is internally consistent.
    pub fn validate(&self) -> KeeperResult<()> {
        self.params.validate()?;
        self.host_zone.validate(&self.params.transfer_port)?;

        validate_delegation_records(
            &self.delegation_records,
            &self.archived_delegation_records,
        )?;
        validate_unbonding_records(&self.unbonding_records, &self.archived_unbonding_records)?;
        validate_redemption_records(&self.redemption_records)?;
        validate_slash_records(&self.slash_records)?;

        for transfer in &self.transfers_in_progress {
            let in_progress = self.delegation_records.iter().any(|record| {
                record.id == transfer.record_id
                    && record.status == DelegationRecordStatus::TransferInProgress
            });
            if !in_progress {
                return Err(KeeperError::InvariantBroken(format!(
                    "transfer {}/{} points at delegation record {} which is not in progress",
                    transfer.channel_id, transfer.sequence, transfer.record_id
                )));
            }
        }

        Ok(())
    }
}

impl<S: KvStore> Keeper<S> {
    /// Loads `genesis` into the store and adopts its params.
    ///
    /// # Panics
    ///
    /// Panics if the genesis state is invalid or cannot be written. The module cannot start from
    /// an inconsistent state.
    pub fn init_genesis(&mut self, genesis: GenesisState) {
        if let Err(err) = genesis.validate() {
            panic!("invalid genesis state: {err}");
        }

        if let Err(err) = self.apply_if_no_error(|keeper| keeper.write_genesis(genesis)) {
            panic!("could not write genesis state: {err}");
        }
    }

    fn write_genesis(&mut self, genesis: GenesisState) -> KeeperResult<()> {
        self.store.set_host_zone(&genesis.host_zone)?;

        for record in &genesis.delegation_records {
            self.store.set_delegation_record(record)?;
        }
        for record in &genesis.archived_delegation_records {
            self.store.archive_delegation_record(record)?;
        }
        for record in &genesis.unbonding_records {
            self.store.set_unbonding_record(record)?;
        }
        for record in &genesis.archived_unbonding_records {
            self.store.archive_unbonding_record(record)?;
        }
        for record in &genesis.redemption_records {
            self.store.set_redemption_record(record)?;
        }

        for record in &genesis.slash_records {
            self.store.set_slash_record(record)?;
        }
        let last_slash_id = genesis.slash_records.iter().map(|r| r.id).max();
        self.store
            .set_last_slash_record_id(last_slash_id.unwrap_or_default())?;

        for transfer in &genesis.transfers_in_progress {
            self.store.set_transfer_in_progress(
                &transfer.channel_id,
                transfer.sequence,
                transfer.record_id,
            )?;
        }

        info!(chain_id = %genesis.host_zone.chain_id, "initialised genesis state");
        self.params = genesis.params;

        Ok(())
    }

    /// Returns the complete state of the module.
    pub fn export_genesis(&self) -> KeeperResult<GenesisState> {
        Ok(GenesisState {
            params: self.params.clone(),
            host_zone: self.host_zone()?,
            delegation_records: self.store.all_active_delegation_records()?,
            archived_delegation_records: self.store.all_archived_delegation_records()?,
            unbonding_records: self.store.all_active_unbonding_records()?,
            archived_unbonding_records: self.store.all_archived_unbonding_records()?,
            redemption_records: self.store.all_redemption_records()?,
            slash_records: self.store.all_slash_records()?,
            transfers_in_progress: self.store.all_transfers_in_progress()?,
        })
    }
}
