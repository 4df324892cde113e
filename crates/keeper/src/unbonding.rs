//! Redemptions, undelegation and the distribution of unbonded tokens.

use stzone_db::{
    kv::KvStore,
    records::{HostZoneDb, UnbondingRecordDb},
    redemption::RedemptionRecordDb,
};
use stzone_primitives::{
    dec::Dec,
    host_zone::HostZone,
    records::{RedemptionRecord, UnbondingRecord, UnbondingRecordStatus},
    types::{Address, Amount, Coin, EpochNumber, RecordId, SignedAmount},
};
use stzone_sm::{
    state_machine::StateMachine,
    unbonding::{
        config::UnbondingSMCfg, duties::UnbondingDuty, events::UnbondingEvent,
        machine::UnbondingSM,
    },
};
use tracing::{debug, info};

use crate::{
    context::BlockCtx,
    errors::{KeeperError, KeeperResult},
    events::StakingEvent,
    keeper::Keeper,
    redemption_rate::check_redemption_rate_within_bounds,
};

fn negative_change(amount: Amount) -> SignedAmount {
    SignedAmount::try_from(amount).map_or(SignedAmount::MIN, |amount| -amount)
}

impl<S: KvStore> Keeper<S> {
    /// Escrows `st_amount` stTokens of `redeemer` and adds the redemption to the accumulating
    /// unbonding record.
    ///
    /// Returns the estimated native tokens owed at the current redemption rate. Runs in its own
    /// scope.
    pub fn redeem_stake(&mut self, redeemer: &Address, st_amount: Amount) -> KeeperResult<Coin> {
        self.apply_if_no_error(|keeper| keeper.execute_redeem_stake(redeemer, st_amount))
    }

    fn execute_redeem_stake(&mut self, redeemer: &Address, st_amount: Amount) -> KeeperResult<Coin> {
        let host_zone = self.unhalted_host_zone()?;
        check_redemption_rate_within_bounds(&host_zone)?;

        let st_denom = host_zone.st_denom();
        let balance = self.bank().balance(redeemer, &st_denom);
        if balance < st_amount {
            return Err(KeeperError::InsufficientFunds {
                holder: redeemer.to_string(),
                denom: st_denom,
                available: balance,
                required: st_amount,
            });
        }

        let accumulating = self.accumulating_unbonding_record()?;

        let native_amount = host_zone
            .redemption_rate
            .mul_floor(st_amount)
            .ok_or(KeeperError::Overflow("native amount"))?;
        if native_amount > host_zone.delegated_balance {
            return Err(KeeperError::UnbondTooLarge {
                native_amount,
                delegated_balance: host_zone.delegated_balance,
            });
        }

        let mut sm = UnbondingSM::new(accumulating);
        sm.process_event(
            &UnbondingSMCfg::from(&host_zone),
            UnbondingEvent::RedemptionAdded {
                native_amount,
                st_token_amount: st_amount,
            },
        )?;
        let unbonding = sm.into_record();

        let mut redemption = self
            .store
            .get_redemption_record(unbonding.id, redeemer)?
            .unwrap_or_else(|| RedemptionRecord::new(unbonding.id, redeemer.clone()));
        redemption.native_amount = redemption
            .native_amount
            .checked_add(native_amount)
            .ok_or(KeeperError::Overflow("redemption native amount"))?;
        redemption.st_token_amount = redemption
            .st_token_amount
            .checked_add(st_amount)
            .ok_or(KeeperError::Overflow("redemption stToken amount"))?;

        let escrow = Coin::new(&st_denom, st_amount);
        self.bank()
            .send_coins(redeemer, &host_zone.redemption_address, &escrow)?;

        self.store.set_unbonding_record(&unbonding)?;
        self.store.set_redemption_record(&redemption)?;

        info!(%redeemer, %st_amount, %native_amount, unbonding_record_id = %unbonding.id, "redeemed stake");
        self.emit(StakingEvent::SuccessfulRedeemStake {
            redeemer: redeemer.clone(),
            host_zone: host_zone.chain_id,
            unbonding_record_id: unbonding.id,
            native_amount,
            st_token_amount: st_amount,
        });

        Ok(Coin::new(host_zone.native_token_denom, native_amount))
    }

    /// Freezes the accumulating unbonding record and opens a new one keyed by `epoch_number`.
    ///
    /// The native amount of every redemption in the frozen record is revalued at the current
    /// redemption rate. A frozen record with nothing to unbond is archived immediately.
    pub fn prepare_undelegation(&mut self, epoch_number: EpochNumber) -> KeeperResult<()> {
        let host_zone = self.unhalted_host_zone()?;
        let frozen = self.accumulating_unbonding_record()?;

        self.safely_set_unbonding_record(&UnbondingRecord::new_accumulating(epoch_number))?;

        let rate = host_zone.redemption_rate;
        let mut total: Amount = 0;
        for mut redemption in self.store.redemption_records_by_unbonding_id(frozen.id)? {
            redemption.native_amount = rate
                .mul_floor(redemption.st_token_amount)
                .ok_or(KeeperError::Overflow("redemption native amount"))?;
            total = total
                .checked_add(redemption.native_amount)
                .ok_or(KeeperError::Overflow("unbonding native amount"))?;
            self.store.set_redemption_record(&redemption)?;
        }

        let record_id = frozen.id;
        let mut sm = UnbondingSM::new(frozen);
        let output = sm.process_event(
            &UnbondingSMCfg::from(&host_zone),
            UnbondingEvent::Frozen {
                native_amount: total,
            },
        )?;
        self.execute_unbonding_duties(sm.record(), output.duties)?;

        info!(%record_id, native_amount = %total, %rate, "froze unbonding record");

        Ok(())
    }

    /// Records that the undelegation of `record_id` was submitted on the host.
    ///
    /// Decrements the delegated balance, burns the escrowed stTokens and checks that the implied
    /// rate of the burn lies within the outer redemption rate bounds. Allowed while halted.
    ///
    /// Runs in its own scope: a failed ratio check undoes the decrement, the burn and the
    /// record update.
    pub fn confirm_undelegation(
        &mut self,
        ctx: &BlockCtx,
        record_id: RecordId,
        tx_hash: &str,
        sender: &Address,
    ) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| {
            keeper.execute_confirm_undelegation(ctx, record_id, tx_hash, sender)
        })
    }

    fn execute_confirm_undelegation(
        &mut self,
        ctx: &BlockCtx,
        record_id: RecordId,
        tx_hash: &str,
        sender: &Address,
    ) -> KeeperResult<()> {
        let host_zone = self.host_zone()?;
        let record = self
            .store
            .get_unbonding_record(record_id)?
            .ok_or_else(|| KeeperError::unbonding_not_found(record_id))?;

        let st_denom = host_zone.st_denom();
        let delegated_before = host_zone.delegated_balance;
        let supply_before = self.bank().supply(&st_denom);

        let mut sm = UnbondingSM::new(record);
        let output = sm.process_event(
            &UnbondingSMCfg::from(&host_zone),
            UnbondingEvent::UndelegationConfirmed {
                tx_hash: tx_hash.to_string(),
                block_time: ctx.unix_seconds(),
            },
        )?;
        self.execute_unbonding_duties(sm.record(), output.duties)?;

        let delegated_after = self.host_zone()?.delegated_balance;
        let supply_after = self.bank().supply(&st_denom);
        verify_undelegation_ratio(
            &host_zone,
            delegated_before.saturating_sub(delegated_after),
            supply_before.saturating_sub(supply_after),
        )?;

        let record = sm.into_record();
        info!(
            %record_id,
            %tx_hash,
            native_amount = %record.native_amount,
            st_token_amount = %record.st_token_amount,
            completion = %record.unbonding_completion_time_seconds,
            "confirmed undelegation"
        );
        self.emit(StakingEvent::ConfirmUndelegation {
            host_zone: host_zone.chain_id,
            record_id,
            native_amount: record.native_amount,
            st_token_amount: record.st_token_amount,
            tx_hash: record.undelegation_tx_hash,
            sender: sender.clone(),
        });

        Ok(())
    }

    /// Moves every record whose unbonding period has elapsed to `UNBONDED`.
    pub fn mark_finished_unbondings(&mut self, ctx: &BlockCtx) -> KeeperResult<()> {
        let host_zone = self.host_zone()?;
        let cfg = UnbondingSMCfg::from(&host_zone);
        let now = ctx.unix_seconds();

        let in_progress = self
            .store
            .unbonding_records_by_status(UnbondingRecordStatus::UnbondingInProgress)?;
        for record in in_progress {
            if now < record.unbonding_completion_time_seconds {
                continue;
            }

            let record_id = record.id;
            let mut sm = UnbondingSM::new(record);
            let output = sm.process_event(&cfg, UnbondingEvent::UnbondingFinished { now })?;
            self.execute_unbonding_duties(sm.record(), output.duties)?;

            info!(%record_id, "unbonding finished");
        }

        Ok(())
    }

    /// Records that the unbonded tokens of `record_id` were swept to the claim account.
    ///
    /// The claim account must already hold the record's native amount.
    pub fn confirm_unbonded_token_sweep(
        &mut self,
        record_id: RecordId,
        tx_hash: &str,
        sender: &Address,
    ) -> KeeperResult<()> {
        let host_zone = self.host_zone()?;
        let record = self
            .store
            .get_unbonding_record(record_id)?
            .ok_or_else(|| KeeperError::unbonding_not_found(record_id))?;

        let mut sm = UnbondingSM::new(record);
        let output = sm.process_event(
            &UnbondingSMCfg::from(&host_zone),
            UnbondingEvent::SweepConfirmed {
                tx_hash: tx_hash.to_string(),
            },
        )?;

        let required = sm.record().native_amount;
        let available = self
            .bank()
            .balance(&host_zone.claim_address, &host_zone.native_token_ibc_denom);
        if available < required {
            return Err(KeeperError::InsufficientFunds {
                holder: host_zone.claim_address.to_string(),
                denom: host_zone.native_token_ibc_denom,
                available,
                required,
            });
        }

        self.execute_unbonding_duties(sm.record(), output.duties)?;

        let record = sm.into_record();
        info!(%record_id, %tx_hash, native_amount = %record.native_amount, "confirmed sweep");
        self.emit(StakingEvent::ConfirmSweep {
            host_zone: host_zone.chain_id,
            record_id,
            native_amount: record.native_amount,
            tx_hash: record.unbonded_token_sweep_tx_hash,
            sender: sender.clone(),
        });

        Ok(())
    }

    /// Pays every redeemer of every `CLAIMABLE` record from the claim account and archives the
    /// records as `CLAIMED`.
    pub fn distribute_claims(&mut self) -> KeeperResult<()> {
        let host_zone = self.unhalted_host_zone()?;
        let cfg = UnbondingSMCfg::from(&host_zone);

        let claimable = self
            .store
            .unbonding_records_by_status(UnbondingRecordStatus::Claimable)?;
        for record in claimable {
            let record_id = record.id;
            for redemption in self.store.redemption_records_by_unbonding_id(record_id)? {
                if redemption.native_amount > 0 {
                    let claim =
                        Coin::new(&host_zone.native_token_ibc_denom, redemption.native_amount);
                    self.bank()
                        .send_coins(&host_zone.claim_address, &redemption.redeemer, &claim)?;
                    debug!(%record_id, redeemer = %redemption.redeemer, %claim, "paid claim");
                }
                self.store
                    .remove_redemption_record(record_id, &redemption.redeemer)?;
            }

            let mut sm = UnbondingSM::new(record);
            let output = sm.process_event(&cfg, UnbondingEvent::ClaimsDistributed)?;
            self.execute_unbonding_duties(sm.record(), output.duties)?;

            info!(%record_id, "distributed claims");
        }

        Ok(())
    }

    /// [`Self::prepare_undelegation`] in its own scope.
    pub fn safely_prepare_undelegation(&mut self, epoch_number: EpochNumber) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| keeper.prepare_undelegation(epoch_number))
    }

    /// [`Self::distribute_claims`] in its own scope.
    pub fn safely_distribute_claims(&mut self) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| keeper.distribute_claims())
    }

    /// Returns the single accumulating unbonding record.
    pub fn accumulating_unbonding_record(&self) -> KeeperResult<UnbondingRecord> {
        let records = self
            .store
            .unbonding_records_by_status(UnbondingRecordStatus::AccumulatingRedemptions)?;

        let [record]: [UnbondingRecord; 1] = records.try_into().map_err(|records: Vec<_>| {
            KeeperError::InvariantBroken(format!(
                "expected exactly one accumulating unbonding record, found {}",
                records.len()
            ))
        })?;

        Ok(record)
    }

    /// Writes a new record, failing if its id is taken in either store.
    pub(crate) fn safely_set_unbonding_record(
        &mut self,
        record: &UnbondingRecord,
    ) -> KeeperResult<()> {
        if self.store.unbonding_record_exists(record.id)? {
            return Err(KeeperError::RecordAlreadyExists {
                kind: "unbonding",
                id: record.id,
            });
        }

        info!(%record, "created unbonding record");
        Ok(self.store.set_unbonding_record(record)?)
    }

    /// Sends `amount` escrowed stTokens from the redemption account to the module and burns
    /// them.
    pub(crate) fn burn_redeemed_st_tokens(
        &self,
        host_zone: &HostZone,
        amount: Amount,
    ) -> KeeperResult<()> {
        let st_token = Coin::new(host_zone.st_denom(), amount);
        let module = &self.params.module_account;

        self.bank()
            .send_coins_from_account_to_module(&host_zone.redemption_address, module, &st_token)?;
        self.bank().burn_coins(module, &st_token)?;

        debug!(%st_token, "burned redeemed stTokens");

        Ok(())
    }

    /// Executes the duties of an unbonding transition and persists the record.
    pub(crate) fn execute_unbonding_duties(
        &mut self,
        record: &UnbondingRecord,
        duties: Vec<UnbondingDuty>,
    ) -> KeeperResult<()> {
        let mut archived = false;
        for duty in duties {
            debug!(record_id = %record.id, %duty, "executing unbonding duty");
            match duty {
                UnbondingDuty::DecrementDelegatedBalance { amount } => {
                    let mut host_zone = self.host_zone()?;
                    host_zone.delegated_balance = host_zone
                        .delegated_balance
                        .checked_sub(amount)
                        .ok_or(KeeperError::NegativeBalance {
                            current: host_zone.delegated_balance,
                            change: negative_change(amount),
                        })?;
                    self.store.set_host_zone(&host_zone)?;
                }
                UnbondingDuty::BurnStTokens { amount } => {
                    let host_zone = self.host_zone()?;
                    self.burn_redeemed_st_tokens(&host_zone, amount)?;
                }
                UnbondingDuty::ArchiveRecord => {
                    self.store.archive_unbonding_record(record)?;
                    archived = true;
                }
            }
        }

        if !archived {
            self.store.set_unbonding_record(record)?;
        }

        Ok(())
    }
}

/// Checks that the delegated balance and stToken supply moved at a rate within the outer bounds.
fn verify_undelegation_ratio(
    host_zone: &HostZone,
    delegated_change: Amount,
    supply_change: Amount,
) -> KeeperResult<()> {
    if supply_change == 0 {
        return Err(KeeperError::DivisionByZero);
    }

    let rate = Dec::from_ratio(delegated_change, supply_change)
        .ok_or(KeeperError::Overflow("implied redemption rate"))?;
    if !host_zone.bounds.outer_contains(rate) {
        return Err(KeeperError::RedemptionRateOutOfBounds {
            rate,
            reason: format!(
                "undelegation moved {delegated_change} native for {supply_change} stTokens, outside [{}, {}]",
                host_zone.bounds.min, host_zone.bounds.max
            ),
        });
    }

    debug!(%rate, "undelegation ratio within bounds");

    Ok(())
}
