//! The events that are relevant to the Unbonding State Machine.

use std::fmt;

use stzone_primitives::types::{Amount, UnixSeconds};

/// The external events that affect an unbonding record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbondingEvent {
    /// A redemption was added to the accumulating record.
    RedemptionAdded {
        /// The native amount owed to the redeemer.
        native_amount: Amount,
        /// The stToken amount escrowed from the redeemer.
        st_token_amount: Amount,
    },

    /// The accumulation window closed.
    ///
    /// The native total is recomputed from the record's redemptions at the current redemption
    /// rate before being posted here.
    Frozen {
        /// The recomputed native total.
        native_amount: Amount,
    },

    /// The operator confirmed the undelegation on the host.
    UndelegationConfirmed {
        /// The host transaction that performed the undelegation.
        tx_hash: String,
        /// The block time at which the confirmation was processed.
        block_time: UnixSeconds,
    },

    /// A new block was observed, which may end the unbonding period.
    UnbondingFinished {
        /// The current block time.
        now: UnixSeconds,
    },

    /// The operator confirmed that the unbonded tokens were swept back.
    SweepConfirmed {
        /// The host transaction that performed the sweep.
        tx_hash: String,
    },

    /// Every redeemer of the record has been paid.
    ClaimsDistributed,
}

impl fmt::Display for UnbondingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedemptionAdded {
                native_amount,
                st_token_amount,
            } => write!(
                f,
                "RedemptionAdded(native: {native_amount}, st: {st_token_amount})"
            ),
            Self::Frozen { native_amount } => write!(f, "Frozen(native: {native_amount})"),
            Self::UndelegationConfirmed {
                tx_hash,
                block_time,
            } => write!(f, "UndelegationConfirmed({tx_hash} at {block_time})"),
            Self::UnbondingFinished { now } => write!(f, "UnbondingFinished(now: {now})"),
            Self::SweepConfirmed { tx_hash } => write!(f, "SweepConfirmed({tx_hash})"),
            Self::ClaimsDistributed => write!(f, "ClaimsDistributed"),
        }
    }
}
