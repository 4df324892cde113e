use stzone_primitives::records::UnbondingRecordStatus;
use tracing::debug;

use crate::unbonding::{
    duties::UnbondingDuty,
    errors::{UnbondingSMError, UnbondingSMResult},
    events::UnbondingEvent,
    machine::{UnbondingSM, UnbondingSMOutput},
};

impl UnbondingSM {
    /// Processes the operator's confirmation that the unbonded tokens were swept back.
    pub(crate) fn process_sweep_confirmed(
        &mut self,
        tx_hash: String,
    ) -> UnbondingSMResult<UnbondingSMOutput> {
        if tx_hash.is_empty() {
            return Err(UnbondingSMError::rejected(
                self.record().clone(),
                UnbondingEvent::SweepConfirmed { tx_hash },
                "tx hash must be specified",
            ));
        }

        let record = self.record();
        match record.status {
            UnbondingRecordStatus::Unbonded => {
                if !record.unbonded_token_sweep_tx_hash.is_empty() {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        UnbondingEvent::SweepConfirmed { tx_hash },
                        "unbonding record already has a sweep tx hash",
                    ));
                }

                if !record.has_positive_totals() {
                    return Err(UnbondingSMError::rejected(
                        record.clone(),
                        UnbondingEvent::SweepConfirmed { tx_hash },
                        "unbonding record must have positive native and stToken amounts",
                    ));
                }

                let record = self.record_mut();
                record.unbonded_token_sweep_tx_hash = tx_hash;
                record.status = UnbondingRecordStatus::Claimable;
                debug!(record = %self.record(), "sweep confirmed");

                Ok(UnbondingSMOutput::new())
            }
            UnbondingRecordStatus::Claimable => Err(UnbondingSMError::duplicate(
                record.clone(),
                UnbondingEvent::SweepConfirmed { tx_hash },
            )),
            status => Err(UnbondingSMError::invalid_event(
                record.clone(),
                UnbondingEvent::SweepConfirmed { tx_hash },
                Some(format!("unbonding record is in status {status}")),
            )),
        }
    }

    /// Marks a claimable record as claimed once all of its redeemers have been paid.
    pub(crate) fn process_claims_distributed(&mut self) -> UnbondingSMResult<UnbondingSMOutput> {
        let event = UnbondingEvent::ClaimsDistributed;

        match self.record().status {
            UnbondingRecordStatus::Claimable => {
                self.record_mut().status = UnbondingRecordStatus::Claimed;
                debug!(record = %self.record(), "claims distributed");

                Ok(UnbondingSMOutput::with_duties(vec![
                    UnbondingDuty::ArchiveRecord,
                ]))
            }
            UnbondingRecordStatus::Claimed => {
                Err(UnbondingSMError::duplicate(self.record().clone(), event))
            }
            _ => Err(UnbondingSMError::invalid_event(
                self.record().clone(),
                event,
                None,
            )),
        }
    }
}
