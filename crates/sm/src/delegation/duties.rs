//! The duties that need to be performed in response to delegation record transitions.

use std::fmt;

use stzone_primitives::types::Amount;

/// The duties emitted by the Delegation State Machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationDuty {
    /// Credit the host zone's delegated balance.
    IncrementDelegatedBalance {
        /// The amount that was delegated on the host.
        amount: Amount,
    },
    /// Move the record from the active store to the archive.
    ArchiveRecord,
}

impl fmt::Display for DelegationDuty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncrementDelegatedBalance { amount } => {
                write!(f, "IncrementDelegatedBalance({amount})")
            }
            Self::ArchiveRecord => write!(f, "ArchiveRecord"),
        }
    }
}
