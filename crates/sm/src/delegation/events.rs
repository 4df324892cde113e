//! The events that are relevant to the Delegation State Machine.

use std::fmt;

/// The external events that affect a delegation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationEvent {
    /// The transfer of the epoch's deposits to the host zone was acknowledged successfully.
    TransferAcknowledged,

    /// The transfer failed, either with an error acknowledgement or a timeout.
    TransferFailed,

    /// The operator confirmed that the deposited tokens were delegated on the host.
    DelegationConfirmed {
        /// The host transaction that performed the delegation.
        tx_hash: String,
    },
}

impl fmt::Display for DelegationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferAcknowledged => write!(f, "TransferAcknowledged"),
            Self::TransferFailed => write!(f, "TransferFailed"),
            Self::DelegationConfirmed { tx_hash } => write!(f, "DelegationConfirmed({tx_hash})"),
        }
    }
}
