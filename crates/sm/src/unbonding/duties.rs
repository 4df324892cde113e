//! The duties that need to be performed in response to unbonding record transitions.

use std::fmt;

use stzone_primitives::types::Amount;

/// The duties emitted by the Unbonding State Machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbondingDuty {
    /// Debit the host zone's delegated balance by the undelegated amount.
    DecrementDelegatedBalance {
        /// The native amount that was undelegated.
        amount: Amount,
    },
    /// Burn the stTokens escrowed in the module account for this record.
    BurnStTokens {
        /// The stToken amount to burn.
        amount: Amount,
    },
    /// Move the record from the active store to the archive.
    ArchiveRecord,
}

impl fmt::Display for UnbondingDuty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecrementDelegatedBalance { amount } => {
                write!(f, "DecrementDelegatedBalance({amount})")
            }
            Self::BurnStTokens { amount } => write!(f, "BurnStTokens({amount})"),
            Self::ArchiveRecord => write!(f, "ArchiveRecord"),
        }
    }
}
