use std::fmt;

use serde::{Deserialize, Serialize};

use super::display_tx_hash;
use crate::types::{Amount, RecordId, UnixSeconds};

/// Status of an [`UnbondingRecord`].
///
/// The variants are declared in lifecycle order so that `status >= UnbondingQueue` reads as
/// "frozen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnbondingRecordStatus {
    /// The open batch absorbing user redemptions.
    AccumulatingRedemptions,
    /// Frozen and waiting for the operator to undelegate.
    UnbondingQueue,
    /// Undelegated on the remote chain, waiting for the unbonding period to elapse.
    UnbondingInProgress,
    /// The unbonding period has elapsed; waiting for the sweep.
    Unbonded,
    /// The sweep landed in the claim account; ready to distribute.
    Claimable,
    /// Distributed to all redeemers. Archive only.
    Claimed,
}

impl UnbondingRecordStatus {
    /// Returns `true` if a record with this status may only live in the archive store.
    pub const fn is_archive_only(&self) -> bool {
        matches!(self, Self::Claimed)
    }
}

impl fmt::Display for UnbondingRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AccumulatingRedemptions => "ACCUMULATING_REDEMPTIONS",
            Self::UnbondingQueue => "UNBONDING_QUEUE",
            Self::UnbondingInProgress => "UNBONDING_IN_PROGRESS",
            Self::Unbonded => "UNBONDED",
            Self::Claimable => "CLAIMABLE",
            Self::Claimed => "CLAIMED",
        };
        f.write_str(s)
    }
}

/// A batch of redemptions unbonded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondingRecord {
    /// The epoch number that opened the record.
    pub id: RecordId,
    /// The lifecycle status.
    pub status: UnbondingRecordStatus,
    /// Native tokens owed to the redeemers.
    pub native_amount: Amount,
    /// stTokens escrowed by the redeemers.
    pub st_token_amount: Amount,
    /// Unix time at which the remote unbonding completes, zero until undelegation.
    pub unbonding_completion_time_seconds: UnixSeconds,
    /// Hash of the undelegation transaction posted by the operator.
    pub undelegation_tx_hash: String,
    /// Hash of the sweep transaction posted by the operator.
    pub unbonded_token_sweep_tx_hash: String,
}

impl UnbondingRecord {
    /// Creates an empty accumulating record.
    pub const fn new_accumulating(id: RecordId) -> Self {
        Self {
            id,
            status: UnbondingRecordStatus::AccumulatingRedemptions,
            native_amount: 0,
            st_token_amount: 0,
            unbonding_completion_time_seconds: 0,
            undelegation_tx_hash: String::new(),
            unbonded_token_sweep_tx_hash: String::new(),
        }
    }

    /// Returns `true` if both totals are strictly positive.
    pub const fn has_positive_totals(&self) -> bool {
        self.native_amount > 0 && self.st_token_amount > 0
    }
}

impl fmt::Display for UnbondingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UnbondingRecord(id: {}, status: {}, native: {}, st: {}, completion: {}, undelegation tx: {}, sweep tx: {})",
            self.id,
            self.status,
            self.native_amount,
            self.st_token_amount,
            self.unbonding_completion_time_seconds,
            display_tx_hash(&self.undelegation_tx_hash),
            display_tx_hash(&self.unbonded_token_sweep_tx_hash),
        )
    }
}
