//! The state transition functions of the Delegation State Machine.

use stzone_primitives::records::DelegationRecordStatus;
use tracing::debug;

use crate::delegation::{
    duties::DelegationDuty,
    errors::{DelegationSMError, DelegationSMResult},
    events::DelegationEvent,
    machine::{DelegationSM, DelegationSMOutput},
};

impl DelegationSM {
    /// Processes a successful transfer acknowledgement.
    ///
    /// Moves a `TRANSFER_IN_PROGRESS` record into the delegation queue.
    pub(crate) fn process_transfer_acknowledged(&mut self) -> DelegationSMResult<DelegationSMOutput> {
        let event = DelegationEvent::TransferAcknowledged;

        match self.record().status {
            DelegationRecordStatus::TransferInProgress => {
                self.record_mut().status = DelegationRecordStatus::DelegationQueue;
                debug!(record = %self.record(), "transfer acknowledged");

                Ok(DelegationSMOutput::new())
            }
            DelegationRecordStatus::DelegationQueue => {
                Err(DelegationSMError::duplicate(self.record().clone(), event))
            }
            _ => Err(DelegationSMError::invalid_event(
                self.record().clone(),
                event,
                None,
            )),
        }
    }

    /// Processes a failed or timed out transfer.
    ///
    /// The record is marked `TRANSFER_FAILED` and archived. The deposited tokens stay on the
    /// host and must be recovered by the operator.
    pub(crate) fn process_transfer_failed(&mut self) -> DelegationSMResult<DelegationSMOutput> {
        let event = DelegationEvent::TransferFailed;

        match self.record().status {
            DelegationRecordStatus::TransferInProgress => {
                self.record_mut().status = DelegationRecordStatus::TransferFailed;
                debug!(record = %self.record(), "transfer failed");

                Ok(DelegationSMOutput::with_duties(vec![
                    DelegationDuty::ArchiveRecord,
                ]))
            }
            DelegationRecordStatus::TransferFailed => {
                Err(DelegationSMError::duplicate(self.record().clone(), event))
            }
            _ => Err(DelegationSMError::invalid_event(
                self.record().clone(),
                event,
                None,
            )),
        }
    }

    /// Processes the operator's confirmation that the queued tokens were delegated.
    ///
    /// Stores the transaction hash, marks the record complete and asks for the delegated balance
    /// to be credited before the record is archived.
    pub(crate) fn process_delegation_confirmed(
        &mut self,
        tx_hash: String,
    ) -> DelegationSMResult<DelegationSMOutput> {
        if tx_hash.is_empty() {
            return Err(DelegationSMError::rejected(
                self.record().clone(),
                DelegationEvent::DelegationConfirmed { tx_hash },
                "tx hash must be specified",
            ));
        }

        match self.record().status {
            DelegationRecordStatus::DelegationQueue => {
                if !self.record().tx_hash.is_empty() {
                    return Err(DelegationSMError::rejected(
                        self.record().clone(),
                        DelegationEvent::DelegationConfirmed { tx_hash },
                        "delegation record already has a tx hash",
                    ));
                }

                let amount = self.record().native_amount;
                if amount == 0 {
                    return Err(DelegationSMError::rejected(
                        self.record().clone(),
                        DelegationEvent::DelegationConfirmed { tx_hash },
                        "delegation record has no native amount",
                    ));
                }

                let record = self.record_mut();
                record.tx_hash = tx_hash;
                record.status = DelegationRecordStatus::DelegationComplete;
                debug!(record = %self.record(), "delegation confirmed");

                Ok(DelegationSMOutput::with_duties(vec![
                    DelegationDuty::IncrementDelegatedBalance { amount },
                    DelegationDuty::ArchiveRecord,
                ]))
            }
            DelegationRecordStatus::DelegationComplete => Err(DelegationSMError::duplicate(
                self.record().clone(),
                DelegationEvent::DelegationConfirmed { tx_hash },
            )),
            status => Err(DelegationSMError::invalid_event(
                self.record().clone(),
                DelegationEvent::DelegationConfirmed { tx_hash },
                Some(format!("delegation record is in status {status}")),
            )),
        }
    }
}
