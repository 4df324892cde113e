//! Liquid staking, delegation preparation and delegation confirmation.

use std::time::Duration;

use stzone_db::{
    kv::KvStore,
    records::{DelegationRecordDb, HostZoneDb},
    transfer::TransferInProgressDb,
};
use stzone_primitives::{
    records::{DelegationRecord, DelegationRecordStatus},
    types::{Address, Amount, Coin, EpochNumber, RecordId},
};
use stzone_sm::{
    delegation::{duties::DelegationDuty, events::DelegationEvent, machine::DelegationSM},
    state_machine::StateMachine,
};
use tracing::{debug, info};

use crate::{
    context::BlockCtx,
    errors::{KeeperError, KeeperResult},
    events::StakingEvent,
    expected_keepers::{CallbackData, MsgTransfer},
    keeper::Keeper,
    redemption_rate::check_redemption_rate_within_bounds,
    transfer_callback::DELEGATION_TRANSFER_CALLBACK_ID,
};

impl<S: KvStore> Keeper<S> {
    /// Stakes `native_amount` of the native token held by `staker` and returns the minted
    /// stTokens.
    ///
    /// The native tokens land in the deposit account until the next delegation. Runs in its own
    /// scope, so a failed mint or send leaves balances untouched.
    pub fn liquid_stake(&mut self, staker: &Address, native_amount: Amount) -> KeeperResult<Coin> {
        self.apply_if_no_error(|keeper| keeper.execute_liquid_stake(staker, native_amount))
    }

    fn execute_liquid_stake(
        &mut self,
        staker: &Address,
        native_amount: Amount,
    ) -> KeeperResult<Coin> {
        let host_zone = self.unhalted_host_zone()?;
        check_redemption_rate_within_bounds(&host_zone)?;

        let st_amount = host_zone
            .redemption_rate
            .div_floor(native_amount)
            .ok_or(KeeperError::Overflow("stToken amount"))?;
        if st_amount == 0 {
            return Err(KeeperError::InsufficientLiquidStake { native_amount });
        }

        let native = Coin::new(&host_zone.native_token_ibc_denom, native_amount);
        self.bank()
            .send_coins(staker, &host_zone.deposit_address, &native)?;

        let st_token = Coin::new(host_zone.st_denom(), st_amount);
        let module = &self.params.module_account;
        self.bank().mint_coins(module, &st_token)?;
        self.bank()
            .send_coins_from_module_to_account(module, staker, &st_token)?;

        info!(%staker, %native, %st_token, "liquid staked");
        self.emit(StakingEvent::SuccessfulLiquidStake {
            staker: staker.clone(),
            host_zone: host_zone.chain_id,
            native_base_denom: host_zone.native_token_denom,
            native_ibc_denom: host_zone.native_token_ibc_denom,
            native_amount,
            st_token_amount: st_amount,
        });

        Ok(st_token)
    }

    /// Sends the deposit account's balance to the host for delegation.
    ///
    /// Creates a `TRANSFER_IN_PROGRESS` record keyed by `epoch_number` and indexes the outbound
    /// packet so that its acknowledgement can be routed back to the record. Does nothing if the
    /// deposit account is empty.
    pub fn prepare_delegation(
        &mut self,
        ctx: &BlockCtx,
        epoch_number: EpochNumber,
        epoch_duration: Duration,
    ) -> KeeperResult<()> {
        let host_zone = self.unhalted_host_zone()?;

        let in_progress = self
            .store
            .delegation_records_by_status(DelegationRecordStatus::TransferInProgress)?;
        if let Some(record) = in_progress.first() {
            return Err(KeeperError::InvariantBroken(format!(
                "cannot prepare delegation while a transfer is in progress (record {})",
                record.id
            )));
        }

        let balance = self
            .bank()
            .balance(&host_zone.deposit_address, &host_zone.native_token_ibc_denom);
        if balance == 0 {
            info!(%epoch_number, "no deposits to delegate");
            return Ok(());
        }

        let record = DelegationRecord::new_in_progress(epoch_number, balance);
        self.safely_set_delegation_record(&record)?;

        let msg = MsgTransfer {
            source_port: self.params.transfer_port.clone(),
            source_channel: host_zone.transfer_channel_id.clone(),
            token: Coin::new(&host_zone.native_token_ibc_denom, balance),
            sender: host_zone.deposit_address.clone(),
            receiver: host_zone.delegation_address.clone(),
            timeout_timestamp: ctx.timeout_after(epoch_duration)?,
            memo: String::new(),
        };
        let sequence = self.collaborators.transfer.transfer(&msg)?;

        self.store
            .set_transfer_in_progress(&msg.source_channel, sequence, record.id)?;
        self.collaborators.callbacks.set_callback_data(CallbackData {
            port_id: msg.source_port,
            channel_id: msg.source_channel,
            sequence,
            callback_id: DELEGATION_TRANSFER_CALLBACK_ID.to_string(),
            args: record.id.to_be_bytes().to_vec(),
        });

        info!(record_id = %record.id, %balance, %sequence, "sent deposits to host for delegation");

        Ok(())
    }

    /// Records that the delegation of `record_id` landed on the host.
    ///
    /// Archives the record as `DELEGATION_COMPLETE` and adds its amount to the delegated
    /// balance. Allowed while halted.
    pub fn confirm_delegation(
        &mut self,
        record_id: RecordId,
        tx_hash: &str,
        sender: &Address,
    ) -> KeeperResult<()> {
        let host_zone = self.host_zone()?;
        let record = self
            .store
            .get_delegation_record(record_id)?
            .ok_or_else(|| KeeperError::delegation_not_found(record_id))?;

        let record = self.process_delegation_event(
            record,
            DelegationEvent::DelegationConfirmed {
                tx_hash: tx_hash.to_string(),
            },
        )?;

        info!(%record_id, %tx_hash, native_amount = %record.native_amount, "confirmed delegation");
        self.emit(StakingEvent::ConfirmDelegation {
            host_zone: host_zone.chain_id,
            record_id,
            native_amount: record.native_amount,
            tx_hash: record.tx_hash,
            sender: sender.clone(),
        });

        Ok(())
    }

    /// Liquid stakes the fee account's balance and hands the stTokens to the fee collector.
    pub fn liquid_stake_and_distribute_fees(&mut self) -> KeeperResult<()> {
        let host_zone = self.unhalted_host_zone()?;

        let fees = self
            .bank()
            .balance(&host_zone.fee_address, &host_zone.native_token_ibc_denom);
        if fees == 0 {
            debug!("no fees to distribute");
            return Ok(());
        }

        let st_token = self.liquid_stake(&host_zone.fee_address, fees)?;
        self.bank().send_coins_from_account_to_module(
            &host_zone.fee_address,
            &self.params.fee_collector_module,
            &st_token,
        )?;

        info!(%fees, %st_token, "distributed fees");

        Ok(())
    }

    /// [`Self::prepare_delegation`] in its own scope.
    pub fn safely_prepare_delegation(
        &mut self,
        ctx: &BlockCtx,
        epoch_number: EpochNumber,
        epoch_duration: Duration,
    ) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| keeper.prepare_delegation(ctx, epoch_number, epoch_duration))
    }

    /// [`Self::liquid_stake_and_distribute_fees`] in its own scope.
    pub fn safely_liquid_stake_and_distribute_fees(&mut self) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| keeper.liquid_stake_and_distribute_fees())
    }

    /// Writes a new record, failing if its id is taken in either store.
    pub(crate) fn safely_set_delegation_record(
        &mut self,
        record: &DelegationRecord,
    ) -> KeeperResult<()> {
        if self.store.delegation_record_exists(record.id)? {
            return Err(KeeperError::RecordAlreadyExists {
                kind: "delegation",
                id: record.id,
            });
        }

        info!(%record, "created delegation record");
        Ok(self.store.set_delegation_record(record)?)
    }

    /// Applies `event` to `record`, executes the resulting duties and persists the record.
    pub(crate) fn process_delegation_event(
        &mut self,
        record: DelegationRecord,
        event: DelegationEvent,
    ) -> KeeperResult<DelegationRecord> {
        let mut sm = DelegationSM::new(record);
        let output = sm.process_event(&(), event)?;
        let record = sm.into_record();

        let mut archived = false;
        for duty in output.duties {
            debug!(record_id = %record.id, %duty, "executing delegation duty");
            match duty {
                DelegationDuty::IncrementDelegatedBalance { amount } => {
                    let mut host_zone = self.host_zone()?;
                    host_zone.delegated_balance = host_zone
                        .delegated_balance
                        .checked_add(amount)
                        .ok_or(KeeperError::Overflow("delegated balance"))?;
                    self.store.set_host_zone(&host_zone)?;
                }
                DelegationDuty::ArchiveRecord => {
                    self.store.archive_delegation_record(&record)?;
                    archived = true;
                }
            }
        }

        if !archived {
            self.store.set_delegation_record(&record)?;
        }

        Ok(record)
    }
}
