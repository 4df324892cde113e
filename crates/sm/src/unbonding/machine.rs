//! The Unbonding State Machine.

use stzone_primitives::records::UnbondingRecord;

use crate::{
    state_machine::{SMOutput, StateMachine},
    unbonding::{
        config::UnbondingSMCfg, duties::UnbondingDuty, errors::UnbondingSMError,
        events::UnbondingEvent,
    },
};

/// The output of the Unbonding State Machine after processing an event.
pub type UnbondingSMOutput = SMOutput<UnbondingDuty>;

/// The state machine that tracks a single unbonding record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbondingSM {
    record: UnbondingRecord,
}

impl UnbondingSM {
    /// Creates a machine for the given record.
    pub const fn new(record: UnbondingRecord) -> Self {
        Self { record }
    }

    /// Returns the current record.
    pub const fn record(&self) -> &UnbondingRecord {
        &self.record
    }

    pub(crate) fn record_mut(&mut self) -> &mut UnbondingRecord {
        &mut self.record
    }

    /// Consumes the machine and returns the record.
    pub fn into_record(self) -> UnbondingRecord {
        self.record
    }
}

impl StateMachine for UnbondingSM {
    type Config = UnbondingSMCfg;
    type Duty = UnbondingDuty;
    type Event = UnbondingEvent;
    type Error = UnbondingSMError;

    fn process_event(
        &mut self,
        cfg: &Self::Config,
        event: Self::Event,
    ) -> Result<SMOutput<Self::Duty>, Self::Error> {
        match event {
            UnbondingEvent::RedemptionAdded {
                native_amount,
                st_token_amount,
            } => self.process_redemption_added(native_amount, st_token_amount),
            UnbondingEvent::Frozen { native_amount } => self.process_frozen(native_amount),
            UnbondingEvent::UndelegationConfirmed {
                tx_hash,
                block_time,
            } => self.process_undelegation_confirmed(cfg, tx_hash, block_time),
            UnbondingEvent::UnbondingFinished { now } => self.process_unbonding_finished(now),
            UnbondingEvent::SweepConfirmed { tx_hash } => self.process_sweep_confirmed(tx_hash),
            UnbondingEvent::ClaimsDistributed => self.process_claims_distributed(),
        }
    }
}
