use stzone_primitives::{records::UnbondingRecordStatus, types::UnixSeconds};
use tracing::debug;

use crate::unbonding::{
    config::UnbondingSMCfg,
    duties::UnbondingDuty,
    errors::{UnbondingSMError, UnbondingSMResult},
    events::UnbondingEvent,
    machine::{UnbondingSM, UnbondingSMOutput},
};

impl UnbondingSM {
    /// Processes the operator's confirmation that the queued record was undelegated on the host.
    ///
    /// Sets the completion time to `block_time + unbonding period` and asks for the delegated
    /// balance to be debited and the escrowed stTokens to be burned.
    pub(crate) fn process_undelegation_confirmed(
        &mut self,
        cfg: &UnbondingSMCfg,
        tx_hash: String,
        block_time: UnixSeconds,
    ) -> UnbondingSMResult<UnbondingSMOutput> {
        let event = || UnbondingEvent::UndelegationConfirmed {
            tx_hash: tx_hash.clone(),
            block_time,
        };

        if tx_hash.is_empty() {
            return Err(UnbondingSMError::rejected(
                self.record().clone(),
                event(),
                "tx hash must be specified",
            ));
        }

        let record = self.record();
        match record.status {
            UnbondingRecordStatus::UnbondingQueue => {
                if !record.undelegation_tx_hash.is_empty()
                    || !record.unbonded_token_sweep_tx_hash.is_empty()
                {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        event(),
                        "unbonding record already has a tx hash",
                    ));
                }

                if !record.has_positive_totals() {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        event(),
                        "unbonding record must have positive native and stToken amounts",
                    ));
                }

                let Some(completion) = block_time.checked_add(cfg.unbonding_period_seconds) else {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        event(),
                        "unbonding completion time overflows",
                    ));
                };

                let duties = vec![
                    UnbondingDuty::DecrementDelegatedBalance {
                        amount: record.native_amount,
                    },
                    UnbondingDuty::BurnStTokens {
                        amount: record.st_token_amount,
                    },
                ];

                let record = self.record_mut();
                record.undelegation_tx_hash = tx_hash;
                record.unbonding_completion_time_seconds = completion;
                record.status = UnbondingRecordStatus::UnbondingInProgress;
                debug!(record = %self.record(), "undelegation confirmed");

                Ok(UnbondingSMOutput::with_duties(duties))
            }
            UnbondingRecordStatus::UnbondingInProgress => {
                Err(UnbondingSMError::duplicate(record.clone(), event()))
            }
            status => Err(UnbondingSMError::invalid_event(
                record.clone(),
                event(),
                Some(format!("unbonding record is in status {status}")),
            )),
        }
    }

    /// Processes a new block time, ending the unbonding period once the completion time is
    /// reached.
    pub(crate) fn process_unbonding_finished(
        &mut self,
        now: UnixSeconds,
    ) -> UnbondingSMResult<UnbondingSMOutput> {
        let event = UnbondingEvent::UnbondingFinished { now };
        let record = self.record();

        match record.status {
            UnbondingRecordStatus::UnbondingInProgress => {
                if now < record.unbonding_completion_time_seconds {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        event,
                        format!(
                            "unbonding completes at {}",
                            record.unbonding_completion_time_seconds
                        ),
                    ));
                }

                self.record_mut().status = UnbondingRecordStatus::Unbonded;
                debug!(record = %self.record(), "unbonding finished");

                Ok(UnbondingSMOutput::new())
            }
            UnbondingRecordStatus::Unbonded => {
                Err(UnbondingSMError::duplicate(record.clone(), event))
            }
            _ => Err(UnbondingSMError::invalid_event(record.clone(), event, None)),
        }
    }
}
