use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Address, Amount, RecordId};

/// A single redeemer's share of an unbonding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecord {
    /// The parent unbonding record.
    pub unbonding_record_id: RecordId,
    /// The redeemer that receives the native tokens.
    pub redeemer: Address,
    /// Native tokens owed. An estimate until the parent is frozen.
    pub native_amount: Amount,
    /// stTokens escrowed.
    pub st_token_amount: Amount,
}

impl RedemptionRecord {
    /// Creates an empty record for a redeemer.
    pub const fn new(unbonding_record_id: RecordId, redeemer: Address) -> Self {
        Self {
            unbonding_record_id,
            redeemer,
            native_amount: 0,
            st_token_amount: 0,
        }
    }

    /// Returns the `{unbonding id}-{redeemer}` label used in logs and errors.
    pub fn label(&self) -> String {
        format!("{}-{}", self.unbonding_record_id, self.redeemer)
    }
}

impl fmt::Display for RedemptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RedemptionRecord(unbonding: {}, redeemer: {}, native: {}, st: {})",
            self.unbonding_record_id, self.redeemer, self.native_amount, self.st_token_amount
        )
    }
}
