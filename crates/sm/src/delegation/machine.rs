//! The Delegation State Machine.

use stzone_primitives::records::DelegationRecord;

use crate::{
    delegation::{duties::DelegationDuty, errors::DelegationSMError, events::DelegationEvent},
    state_machine::{SMOutput, StateMachine},
};

/// The output of the Delegation State Machine after processing an event.
pub type DelegationSMOutput = SMOutput<DelegationDuty>;

/// The state machine that tracks a single delegation record.
///
/// The record itself is the state. The machine never reads or writes storage, the caller loads
/// the record, feeds it an event and persists the result together with the emitted duties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationSM {
    record: DelegationRecord,
}

impl DelegationSM {
    /// Creates a machine for the given record.
    pub const fn new(record: DelegationRecord) -> Self {
        Self { record }
    }

    /// Returns the current record.
    pub const fn record(&self) -> &DelegationRecord {
        &self.record
    }

    /// Returns a mutable reference to the current record.
    pub(crate) fn record_mut(&mut self) -> &mut DelegationRecord {
        &mut self.record
    }

    /// Consumes the machine and returns the record.
    pub fn into_record(self) -> DelegationRecord {
        self.record
    }
}

impl StateMachine for DelegationSM {
    type Config = ();
    type Duty = DelegationDuty;
    type Event = DelegationEvent;
    type Error = DelegationSMError;

    fn process_event(
        &mut self,
        _cfg: &Self::Config,
        event: Self::Event,
    ) -> Result<SMOutput<Self::Duty>, Self::Error> {
        match event {
            DelegationEvent::TransferAcknowledged => self.process_transfer_acknowledged(),
            DelegationEvent::TransferFailed => self.process_transfer_failed(),
            DelegationEvent::DelegationConfirmed { tx_hash } => {
                self.process_delegation_confirmed(tx_hash)
            }
        }
    }
}
