//! Message dispatch, including the admin-only operations.

use stzone_db::{
    keys,
    kv::KvStore,
    records::{DelegationRecordDb, SlashRecordDb, UnbondingRecordDb},
    redemption::RedemptionRecordDb,
};
use stzone_primitives::{
    records::{DelegationRecord, RedemptionRecord, SlashRecord, UnbondingRecord},
    types::{Address, SignedAmount},
};
use tracing::{debug, info, warn};

use crate::{
    admin::{check_role, AdminRole},
    context::BlockCtx,
    errors::{KeeperError, KeeperResult},
    keeper::Keeper,
    msgs::{Msg, MsgResponse},
};

impl<S: KvStore> Keeper<S> {
    /// Validates and executes `msg` in its own scope.
    pub fn handle_msg(&mut self, ctx: &BlockCtx, msg: Msg) -> KeeperResult<MsgResponse> {
        msg.validate_basic(&self.params)?;
        debug!(msg = msg.name(), signer = %msg.signer(), "handling message");

        self.apply_if_no_error(|keeper| keeper.dispatch(ctx, msg))
    }

    fn dispatch(&mut self, ctx: &BlockCtx, msg: Msg) -> KeeperResult<MsgResponse> {
        match msg {
            Msg::LiquidStake(msg) => self
                .liquid_stake(&msg.staker, msg.native_amount)
                .map(|st_token| MsgResponse::LiquidStake { st_token }),
            Msg::RedeemStake(msg) => self
                .redeem_stake(&msg.redeemer, msg.st_token_amount)
                .map(|native_token| MsgResponse::RedeemStake { native_token }),
            Msg::ConfirmDelegation(msg) => {
                self.require_role(&msg.operator, AdminRole::Operator)?;
                self.confirm_delegation(msg.record_id, &msg.tx_hash, &msg.operator)?;
                Ok(MsgResponse::Empty)
            }
            Msg::ConfirmUndelegation(msg) => {
                self.require_role(&msg.operator, AdminRole::Operator)?;
                self.confirm_undelegation(ctx, msg.record_id, &msg.tx_hash, &msg.operator)?;
                Ok(MsgResponse::Empty)
            }
            Msg::ConfirmUnbondedTokenSweep(msg) => {
                self.require_role(&msg.operator, AdminRole::Operator)?;
                self.confirm_unbonded_token_sweep(msg.record_id, &msg.tx_hash, &msg.operator)?;
                Ok(MsgResponse::Empty)
            }
            Msg::AdjustDelegatedBalance(msg) => {
                self.require_role(&msg.operator, AdminRole::Safe)?;
                self.adjust_delegated_balance(ctx, msg.delegation_offset, msg.validator_address)?;
                Ok(MsgResponse::Empty)
            }
            Msg::UpdateInnerRedemptionRateBounds(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.update_inner_redemption_rate_bounds(
                    msg.min_inner_redemption_rate,
                    msg.max_inner_redemption_rate,
                )?;
                Ok(MsgResponse::Empty)
            }
            Msg::ResumeHostZone(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.resume_host_zone()?;
                Ok(MsgResponse::Empty)
            }
            Msg::RefreshRedemptionRate(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.update_redemption_rate()?;
                Ok(MsgResponse::Empty)
            }
            Msg::SetOperatorAddress(msg) => {
                self.require_role(&msg.signer, AdminRole::Safe)?;
                self.set_operator_address(msg.operator)?;
                Ok(MsgResponse::Empty)
            }
            Msg::OverwriteDelegationRecord(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.overwrite_delegation_record(&msg.delegation_record)?;
                Ok(MsgResponse::Empty)
            }
            Msg::OverwriteUnbondingRecord(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.overwrite_unbonding_record(&msg.unbonding_record)?;
                Ok(MsgResponse::Empty)
            }
            Msg::OverwriteRedemptionRecord(msg) => {
                self.require_role(&msg.creator, AdminRole::Safe)?;
                self.overwrite_redemption_record(&msg.redemption_record)?;
                Ok(MsgResponse::Empty)
            }
        }
    }

    fn require_role(&self, sender: &Address, role: AdminRole) -> KeeperResult<()> {
        check_role(&self.host_zone()?, sender, role)
    }

    /// Applies a signed correction to the delegated balance and records it as a slash record.
    pub fn adjust_delegated_balance(
        &mut self,
        ctx: &BlockCtx,
        offset: SignedAmount,
        validator_address: String,
    ) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;
        let current = host_zone.delegated_balance;

        host_zone.delegated_balance = if offset >= 0 {
            current
                .checked_add(offset.unsigned_abs())
                .ok_or(KeeperError::Overflow("delegated balance"))?
        } else {
            current
                .checked_sub(offset.unsigned_abs())
                .ok_or(KeeperError::NegativeBalance {
                    current,
                    change: offset,
                })?
        };
        self.set_host_zone(&host_zone)?;

        let record = SlashRecord {
            id: self.store.next_slash_record_id()?,
            time: ctx.unix_seconds(),
            native_amount: offset,
            validator_address,
        };
        self.store.set_slash_record(&record)?;

        warn!(%record, delegated_balance = %host_zone.delegated_balance, "adjusted delegated balance");

        Ok(())
    }

    /// Lifts a halt and unblocks the stToken.
    pub fn resume_host_zone(&mut self) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;
        if !host_zone.halted {
            return Err(KeeperError::NotHalted {
                chain_id: host_zone.chain_id,
            });
        }

        self.collaborators
            .rate_limit
            .remove_denom_from_blacklist(&host_zone.st_denom());
        host_zone.halted = false;
        self.set_host_zone(&host_zone)?;

        info!(chain_id = %host_zone.chain_id, "resumed host zone");

        Ok(())
    }

    /// Replaces the operator.
    pub fn set_operator_address(&mut self, operator: Address) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;
        info!(old = %host_zone.operator_address, new = %operator, "setting operator address");

        host_zone.operator_address = operator;
        self.set_host_zone(&host_zone)
    }

    /// Replaces a delegation record wholesale.
    ///
    /// Archive-only statuses are written to the archive, every other status to the active store.
    /// Any copy in the other store is removed.
    pub fn overwrite_delegation_record(&mut self, record: &DelegationRecord) -> KeeperResult<()> {
        if record.status.is_archive_only() {
            self.store.archive_delegation_record(record)?;
        } else {
            self.store.delete(&keys::delegation_archive_key(record.id))?;
            self.store.set_delegation_record(record)?;
        }

        warn!(%record, "overwrote delegation record");

        Ok(())
    }

    /// Replaces an unbonding record wholesale.
    ///
    /// Placement follows [`Self::overwrite_delegation_record`]. Fails if the result would not
    /// leave exactly one accumulating record.
    pub fn overwrite_unbonding_record(&mut self, record: &UnbondingRecord) -> KeeperResult<()> {
        if record.status.is_archive_only() {
            self.store.archive_unbonding_record(record)?;
        } else {
            self.store.delete(&keys::unbonding_archive_key(record.id))?;
            self.store.set_unbonding_record(record)?;
        }
        self.accumulating_unbonding_record()?;

        warn!(%record, "overwrote unbonding record");

        Ok(())
    }

    /// Replaces a redemption record wholesale.
    pub fn overwrite_redemption_record(&mut self, record: &RedemptionRecord) -> KeeperResult<()> {
        self.store.set_redemption_record(record)?;
        warn!(%record, "overwrote redemption record");

        Ok(())
    }
}
