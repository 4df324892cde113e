use std::fmt;

use serde::{Deserialize, Serialize};

use super::display_tx_hash;
use crate::types::{Amount, RecordId};

/// Status of a [`DelegationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DelegationRecordStatus {
    /// The deposit balance is being transferred to the delegation account.
    TransferInProgress,
    /// The transfer failed or timed out. Archive only.
    TransferFailed,
    /// The tokens have landed and await delegation by the operator.
    DelegationQueue,
    /// The operator confirmed the delegation. Archive only.
    DelegationComplete,
}

impl DelegationRecordStatus {
    /// Returns `true` if a record with this status may only live in the archive store.
    pub const fn is_archive_only(&self) -> bool {
        matches!(self, Self::TransferFailed | Self::DelegationComplete)
    }
}

impl fmt::Display for DelegationRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TransferInProgress => "TRANSFER_IN_PROGRESS",
            Self::TransferFailed => "TRANSFER_FAILED",
            Self::DelegationQueue => "DELEGATION_QUEUE",
            Self::DelegationComplete => "DELEGATION_COMPLETE",
        };
        f.write_str(s)
    }
}

/// A batch of deposits sent to the remote delegation account in one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationRecord {
    /// The epoch number that created the record.
    pub id: RecordId,
    /// The native amount transferred.
    pub native_amount: Amount,
    /// The lifecycle status.
    pub status: DelegationRecordStatus,
    /// Hash of the delegation transaction posted by the operator.
    pub tx_hash: String,
}

impl DelegationRecord {
    /// Creates a record for a transfer that has just been submitted.
    pub const fn new_in_progress(id: RecordId, native_amount: Amount) -> Self {
        Self {
            id,
            native_amount,
            status: DelegationRecordStatus::TransferInProgress,
            tx_hash: String::new(),
        }
    }
}

impl fmt::Display for DelegationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DelegationRecord(id: {}, status: {}, native: {}, tx: {})",
            self.id,
            self.status,
            self.native_amount,
            display_tx_hash(&self.tx_hash)
        )
    }
}
